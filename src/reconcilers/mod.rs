// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-if-absent provisioning and best-effort teardown.

pub mod postgres;
pub mod teardown;

pub use postgres::PostgresReconciler;
pub use teardown::{StepOutcome, TeardownReport, TeardownStep};
