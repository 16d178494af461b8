// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Postgres reconciler - creates the postgres Deployment and Service when
//! missing and tears them down again.

use crate::config::PostgresConfig;
use crate::constants::kinds;
use crate::error::{is_already_exists, is_not_found, PostgresError, Result};
use crate::reconcilers::teardown::{StepOutcome, TeardownReport, TeardownStep};
use crate::types::{EndpointSpec, WorkloadSpec};
use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};
use k8s_openapi::api::core::v1::Service;
use kube::{
    api::{DeleteParams, Patch, PatchParams, PostParams},
    Api, Client, ResourceExt,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{debug, error, info, instrument, warn};

/// Holds no state besides the client and the configured parameters; the API
/// server is the only record of what exists.
#[derive(Clone)]
pub struct PostgresReconciler {
    client: Client,
    config: PostgresConfig,
}

impl PostgresReconciler {
    pub fn new(client: Client, config: PostgresConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }

    pub fn workload_spec(&self) -> WorkloadSpec {
        WorkloadSpec::from_config(&self.config)
    }

    pub fn endpoint_spec(&self) -> EndpointSpec {
        EndpointSpec::from_config(&self.config)
    }

    /// Ensure the configured Deployment and Service exist
    pub async fn provision(&self, namespace: &str) -> Result<()> {
        self.ensure_workload(namespace, &self.workload_spec()).await?;
        self.ensure_endpoint(namespace, &self.endpoint_spec()).await?;
        info!("Postgres {}/{} provisioned", namespace, self.config.name);
        Ok(())
    }

    /// Create the Deployment if no Deployment with that name exists.
    /// An existing Deployment is left untouched.
    #[instrument(skip(self, spec), fields(name = %spec.name))]
    pub async fn ensure_workload(&self, namespace: &str, spec: &WorkloadSpec) -> Result<()> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        ensure_exists(&deployments, kinds::DEPLOYMENT, &spec.name, || spec.to_deployment()).await
    }

    /// Create the Service if no Service with that name exists
    #[instrument(skip(self, spec), fields(name = %spec.name))]
    pub async fn ensure_endpoint(&self, namespace: &str, spec: &EndpointSpec) -> Result<()> {
        let services: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        ensure_exists(&services, kinds::SERVICE, &spec.name, || spec.to_service()).await
    }

    /// Remove the Service, Deployment and ReplicaSet named `name`.
    ///
    /// Every step is attempted exactly once regardless of how the previous
    /// ones went. Failures are logged and collected in the report; this
    /// never returns an error.
    #[instrument(skip(self))]
    pub async fn teardown(&self, namespace: &str, name: &str) -> TeardownReport {
        let services: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let replica_sets: Api<ReplicaSet> = Api::namespaced(self.client.clone(), namespace);
        let mut report = TeardownReport::default();

        report.record(
            TeardownStep::DeleteService,
            delete_step(&services, kinds::SERVICE, name).await,
        );

        let (outcome, deployment) = fetch_step(&deployments, kinds::DEPLOYMENT, name).await;
        report.record(TeardownStep::FetchDeployment, outcome);

        report.record(
            TeardownStep::ScaleDeployment,
            scale_to_zero(&deployments, name, deployment).await,
        );

        report.record(
            TeardownStep::DeleteDeployment,
            delete_step(&deployments, kinds::DEPLOYMENT, name).await,
        );

        // The deployment controller does not always reap these
        let (outcome, replica_set) = fetch_step(&replica_sets, kinds::REPLICA_SET, name).await;
        report.record(TeardownStep::FetchReplicaSet, outcome);

        let replica_set_name = replica_set
            .map(|rs| rs.name_any())
            .unwrap_or_else(|| name.to_string());
        report.record(
            TeardownStep::DeleteReplicaSet,
            delete_step(&replica_sets, kinds::REPLICA_SET, &replica_set_name).await,
        );

        if report.is_clean() {
            info!("Teardown of {}/{} complete", namespace, name);
        } else {
            warn!(
                "Teardown of {}/{} finished with {} failed step(s)",
                namespace,
                name,
                report.failures().count()
            );
        }

        report
    }
}

async fn ensure_exists<K, F>(api: &Api<K>, kind: &'static str, name: &str, build: F) -> Result<()>
where
    K: Clone + DeserializeOwned + Serialize + Debug,
    F: FnOnce() -> K,
{
    match api.get(name).await {
        Ok(_) => {
            debug!("{} {} already exists", kind, name);
            Ok(())
        }
        Err(e) if is_not_found(&e) => {
            info!("{} {} not found, creating...", kind, name);
            match api.create(&PostParams::default(), &build()).await {
                Ok(_) => {
                    info!("Created {} {}", kind, name);
                    Ok(())
                }
                Err(e) if is_already_exists(&e) => {
                    info!("{} {} was created concurrently", kind, name);
                    Ok(())
                }
                Err(e) => {
                    error!("Could not create {} {}: {}", kind, name, e);
                    Err(PostgresError::mutation(kind, name, "create", e))
                }
            }
        }
        Err(e) => {
            error!("Could not get {} {}: {}", kind, name, e);
            Err(PostgresError::lookup(kind, name, e))
        }
    }
}

async fn fetch_step<K>(api: &Api<K>, kind: &'static str, name: &str) -> (StepOutcome, Option<K>)
where
    K: Clone + DeserializeOwned + Debug,
{
    match api.get(name).await {
        Ok(obj) => (StepOutcome::Done, Some(obj)),
        Err(e) if is_not_found(&e) => {
            warn!("Could not get {} {}: not found", kind, name);
            (StepOutcome::Absent, None)
        }
        Err(e) => {
            error!("Could not get {} {}: {}", kind, name, e);
            (StepOutcome::Failed(e.to_string()), None)
        }
    }
}

async fn delete_step<K>(api: &Api<K>, kind: &'static str, name: &str) -> StepOutcome
where
    K: Clone + DeserializeOwned + Debug,
{
    match api.delete(name, &DeleteParams::default()).await {
        Ok(_) => {
            info!("Deleted {} {}", kind, name);
            StepOutcome::Done
        }
        Err(e) if is_not_found(&e) => {
            warn!("Could not delete {} {}: not found", kind, name);
            StepOutcome::Absent
        }
        Err(e) => {
            error!("Could not delete {} {}: {}", kind, name, e);
            StepOutcome::Failed(e.to_string())
        }
    }
}

/// Drain the pods before the Deployment goes away. Uses the fetched object
/// when there is one; otherwise patches by name.
async fn scale_to_zero(
    deployments: &Api<Deployment>,
    name: &str,
    fetched: Option<Deployment>,
) -> StepOutcome {
    let result = match fetched.and_then(with_zero_replicas) {
        Some(deployment) => deployments
            .replace(name, &PostParams::default(), &deployment)
            .await
            .map(|_| ()),
        None => {
            let patch = serde_json::json!({ "spec": { "replicas": 0 } });
            deployments
                .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
                .await
                .map(|_| ())
        }
    };

    match result {
        Ok(()) => {
            info!("Scaled {} {} to zero", kinds::DEPLOYMENT, name);
            StepOutcome::Done
        }
        Err(e) if is_not_found(&e) => {
            warn!("Could not scale {} {}: not found", kinds::DEPLOYMENT, name);
            StepOutcome::Absent
        }
        Err(e) => {
            error!("Could not scale {} {}: {}", kinds::DEPLOYMENT, name, e);
            StepOutcome::Failed(e.to_string())
        }
    }
}

fn with_zero_replicas(mut deployment: Deployment) -> Option<Deployment> {
    deployment.spec.as_mut()?.replicas = Some(0);
    Some(deployment)
}
