// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Desired state of the postgres Service.

use crate::config::PostgresConfig;
use crate::constants::{defaults, labels};
use crate::types::workload::app_labels;
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

/// Only cluster-internal addressing is supported
pub const SERVICE_TYPE: &str = "ClusterIP";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePortSpec {
    pub name: String,
    pub port: i32,
    pub target_port: i32,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    /// Must equal the workload's pod labels for traffic to route
    pub selector: BTreeMap<String, String>,
    pub ports: Vec<ServicePortSpec>,
}

impl EndpointSpec {
    pub fn from_config(config: &PostgresConfig) -> Self {
        Self {
            name: config.name.clone(),
            labels: BTreeMap::from([(labels::NAME.to_string(), config.name.clone())]),
            selector: app_labels(&config.name),
            ports: vec![ServicePortSpec {
                name: defaults::SERVICE_PORT_NAME.to_string(),
                port: config.port,
                target_port: config.port,
                protocol: "TCP".to_string(),
            }],
        }
    }

    pub fn to_service(&self) -> Service {
        Service {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                labels: Some(self.labels.clone()),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                selector: Some(self.selector.clone()),
                ports: Some(
                    self.ports
                        .iter()
                        .map(|p| ServicePort {
                            name: Some(p.name.clone()),
                            port: p.port,
                            target_port: Some(IntOrString::Int(p.target_port)),
                            protocol: Some(p.protocol.clone()),
                            ..Default::default()
                        })
                        .collect(),
                ),
                type_: Some(SERVICE_TYPE.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}
