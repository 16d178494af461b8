// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use crate::error::{PostgresError, Result};
use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Process configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace the postgres resources live in
    pub namespace: String,
    pub postgres: PostgresConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let namespace = env::var("TARGET_NAMESPACE")
            .context("TARGET_NAMESPACE environment variable not set")?;

        let base = match env::var("POSTGRES_CONFIG") {
            Ok(path) => PostgresConfig::from_file(&path)?,
            Err(_) => PostgresConfig::default(),
        };
        let postgres = base.with_overrides(|key| env::var(key).ok())?;

        Ok(Config {
            namespace,
            postgres,
        })
    }
}

/// Parameters of the postgres deployment and service.
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostgresConfig {
    pub name: String,
    pub replicas: i32,
    pub image: String,
    pub image_pull_policy: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub data_dir: String,
    pub port: i32,
    pub volume_mount_path: String,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            name: defaults::NAME.to_string(),
            replicas: defaults::REPLICAS,
            image: defaults::IMAGE.to_string(),
            image_pull_policy: defaults::IMAGE_PULL_POLICY.to_string(),
            user: defaults::USER.to_string(),
            password: defaults::PASSWORD.to_string(),
            database: defaults::DATABASE.to_string(),
            data_dir: defaults::DATA_DIR.to_string(),
            port: defaults::PORT,
            volume_mount_path: defaults::VOLUME_MOUNT_PATH.to_string(),
        }
    }
}

impl PostgresConfig {
    /// Read a YAML file, falling back to defaults for missing keys
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(raw).map_err(|e| PostgresError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the API server would refuse on create
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(PostgresError::Config("name must not be empty".to_string()));
        }
        if self.replicas < 0 {
            return Err(PostgresError::Config(format!(
                "replicas must be non-negative, got {}",
                self.replicas
            )));
        }
        if !(1..=65535).contains(&self.port) {
            return Err(PostgresError::Config(format!(
                "port must be within 1..=65535, got {}",
                self.port
            )));
        }
        Ok(())
    }

    /// Apply `POSTGRES_*` overrides resolved through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("POSTGRES_NAME") {
            self.name = name;
        }
        if let Some(image) = lookup("POSTGRES_IMAGE") {
            self.image = image;
        }
        if let Some(replicas) = lookup("POSTGRES_REPLICAS") {
            self.replicas = replicas
                .parse::<u16>()
                .map(i32::from)
                .map_err(|_| {
                    PostgresError::Config(format!(
                        "POSTGRES_REPLICAS must be a non-negative integer, got '{}'",
                        replicas
                    ))
                })?;
        }
        if let Some(user) = lookup("POSTGRES_USER") {
            self.user = user;
        }
        if let Some(password) = lookup("POSTGRES_PASSWORD") {
            self.password = password;
        }
        if let Some(database) = lookup("POSTGRES_DB") {
            self.database = database;
        }

        self.validate()?;
        Ok(self)
    }
}
