// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Result};
use kube::Client;
use std::str::FromStr;
use tracing::info;

use pg_fixture::config::Config;
use pg_fixture::reconcilers::PostgresReconciler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Up,
    Down,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(Action::Up),
            "down" => Ok(Action::Down),
            other => bail!("Unknown action '{}', expected 'up' or 'down'", other),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let Some(arg) = std::env::args().nth(1) else {
        bail!("Usage: pg-fixture <up|down>");
    };
    let action: Action = arg.parse()?;

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace={}, name={}, image={}",
        config.namespace, config.postgres.name, config.postgres.image
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let reconciler = PostgresReconciler::new(client, config.postgres);

    match action {
        Action::Up => reconciler.provision(&config.namespace).await?,
        // Failed steps are logged by the reconciler itself
        Action::Down => {
            reconciler
                .teardown(&config.namespace, &reconciler.config().name)
                .await;
        }
    }

    Ok(())
}
