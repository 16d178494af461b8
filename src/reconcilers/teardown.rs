// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Outcome bookkeeping for best-effort teardown.

use std::fmt;

/// Teardown steps, in the order they are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownStep {
    DeleteService,
    FetchDeployment,
    ScaleDeployment,
    DeleteDeployment,
    FetchReplicaSet,
    DeleteReplicaSet,
}

impl fmt::Display for TeardownStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TeardownStep::DeleteService => "delete service",
            TeardownStep::FetchDeployment => "fetch deployment",
            TeardownStep::ScaleDeployment => "scale deployment to zero",
            TeardownStep::DeleteDeployment => "delete deployment",
            TeardownStep::FetchReplicaSet => "fetch replica set",
            TeardownStep::DeleteReplicaSet => "delete replica set",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    /// The API answered 404
    Absent,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub steps: Vec<(TeardownStep, StepOutcome)>,
}

impl TeardownReport {
    pub fn record(&mut self, step: TeardownStep, outcome: StepOutcome) {
        self.steps.push((step, outcome));
    }

    pub fn outcome(&self, step: TeardownStep) -> Option<&StepOutcome> {
        self.steps.iter().find(|(s, _)| *s == step).map(|(_, o)| o)
    }

    pub fn failures(&self) -> impl Iterator<Item = (TeardownStep, &str)> {
        self.steps.iter().filter_map(|(step, outcome)| match outcome {
            StepOutcome::Failed(detail) => Some((*step, detail.as_str())),
            _ => None,
        })
    }

    /// True when nothing failed; absent resources count as clean
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}
