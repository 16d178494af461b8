// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostgresError {
    /// The existence check itself failed (anything other than 404)
    #[error("Failed to look up {kind} {name}: {source}")]
    Lookup {
        kind: &'static str,
        name: String,
        #[source]
        source: kube::Error,
    },

    /// A create/update/delete call failed
    #[error("Failed to {action} {kind} {name}: {source}")]
    Mutation {
        kind: &'static str,
        name: String,
        action: &'static str,
        #[source]
        source: kube::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl PostgresError {
    pub fn lookup(kind: &'static str, name: &str, source: kube::Error) -> Self {
        PostgresError::Lookup {
            kind,
            name: name.to_string(),
            source,
        }
    }

    pub fn mutation(
        kind: &'static str,
        name: &str,
        action: &'static str,
        source: kube::Error,
    ) -> Self {
        PostgresError::Mutation {
            kind,
            name: name.to_string(),
            action,
            source,
        }
    }
}

/// True when the API answered 404 for the request
pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

/// True when a create was rejected because the name is already taken
pub fn is_already_exists(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 409)
}

pub type Result<T> = std::result::Result<T, PostgresError>;
