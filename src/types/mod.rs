// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Desired-state descriptions of the managed resources.

pub mod endpoint;
pub mod workload;

pub use endpoint::{EndpointSpec, ServicePortSpec};
pub use workload::{PortSpec, VolumeMountSpec, WorkloadSpec};
