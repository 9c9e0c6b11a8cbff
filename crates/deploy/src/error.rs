// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Deployment error taxonomy.

use std::time::Duration;

use thiserror::Error;

use ceph_bench_juju::JujuError;

use crate::vault::VaultError;

/// Ways a deployment can fail.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The spec violates an invariant before anything external runs.
    #[error("invalid deployment spec: {0}")]
    InvalidSpec(String),

    /// Units never settled within the wait budget.
    #[error("deployment timed out after {0:?} waiting for units to settle")]
    Timeout(Duration),

    /// The orchestrator reported an error (bad charm path, unresolvable
    /// channel, model-name collision, ...).
    #[error(transparent)]
    Client(#[from] JujuError),

    /// The bundle could not be rendered to YAML.
    #[error("failed to render bundle: {0}")]
    Bundle(#[from] serde_yaml::Error),

    /// The bundle could not be staged on disk.
    #[error("failed to stage bundle: {0}")]
    Io(#[from] std::io::Error),

    /// Vault bring-up for the gateway stack failed.
    #[error("vault bring-up failed: {0}")]
    Vault(#[from] VaultError),
}
