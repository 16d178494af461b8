// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Desired state of the postgres Deployment.

use crate::config::PostgresConfig;
use crate::constants::{defaults, env, labels};
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EmptyDirVolumeSource, EnvVar, PodSpec, PodTemplateSpec, Volume,
    VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub name: String,
    pub port: i32,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMountSpec {
    pub name: String,
    pub mount_path: String,
}

/// A single-container workload. `name` is the lookup key and also names the
/// container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSpec {
    pub name: String,
    pub replicas: i32,
    pub image: String,
    pub image_pull_policy: String,
    pub env: BTreeMap<String, String>,
    pub ports: Vec<PortSpec>,
    pub volume_mounts: Vec<VolumeMountSpec>,
    /// Names of emptyDir volumes; nothing else is supported
    pub empty_dir_volumes: Vec<String>,
    pub labels: BTreeMap<String, String>,
}

impl WorkloadSpec {
    pub fn from_config(config: &PostgresConfig) -> Self {
        let env = BTreeMap::from([
            (env::USER.to_string(), config.user.clone()),
            (env::PASSWORD.to_string(), config.password.clone()),
            (env::DATABASE.to_string(), config.database.clone()),
            (env::DATA_DIR.to_string(), config.data_dir.clone()),
        ]);

        Self {
            name: config.name.clone(),
            replicas: config.replicas,
            image: config.image.clone(),
            image_pull_policy: config.image_pull_policy.clone(),
            env,
            ports: vec![PortSpec {
                name: defaults::CONTAINER_PORT_NAME.to_string(),
                port: config.port,
                protocol: "TCP".to_string(),
            }],
            volume_mounts: vec![VolumeMountSpec {
                name: defaults::VOLUME_NAME.to_string(),
                mount_path: config.volume_mount_path.clone(),
            }],
            empty_dir_volumes: vec![defaults::VOLUME_NAME.to_string()],
            labels: app_labels(&config.name),
        }
    }

    /// Build the Deployment object sent on create
    pub fn to_deployment(&self) -> Deployment {
        let container = Container {
            name: self.name.clone(),
            image: Some(self.image.clone()),
            image_pull_policy: Some(self.image_pull_policy.clone()),
            env: Some(
                self.env
                    .iter()
                    .map(|(name, value)| EnvVar {
                        name: name.clone(),
                        value: Some(value.clone()),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ports: Some(
                self.ports
                    .iter()
                    .map(|p| ContainerPort {
                        name: Some(p.name.clone()),
                        container_port: p.port,
                        protocol: Some(p.protocol.clone()),
                        ..Default::default()
                    })
                    .collect(),
            ),
            volume_mounts: Some(
                self.volume_mounts
                    .iter()
                    .map(|m| VolumeMount {
                        name: m.name.clone(),
                        mount_path: m.mount_path.clone(),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        };

        let volumes = self
            .empty_dir_volumes
            .iter()
            .map(|name| Volume {
                name: name.clone(),
                empty_dir: Some(EmptyDirVolumeSource::default()),
                ..Default::default()
            })
            .collect();

        Deployment {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                labels: Some(self.labels.clone()),
                ..Default::default()
            },
            spec: Some(DeploymentSpec {
                replicas: Some(self.replicas),
                selector: LabelSelector {
                    match_labels: Some(self.labels.clone()),
                    ..Default::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(self.labels.clone()),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        containers: vec![container],
                        volumes: Some(volumes),
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// Labels carried by the pod template; the service selects on these
pub fn app_labels(name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(labels::APP.to_string(), name.to_string())])
}
