// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Client error taxonomy.

use thiserror::Error;

/// Errors from driving the `juju` binary.
#[derive(Debug, Error)]
pub enum JujuError {
    /// The binary could not be spawned at all.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// The command line that failed to start.
        command: String,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The binary ran and exited non-zero.
    #[error("`{command}` failed: {stderr}")]
    Command {
        /// The command line that failed.
        command: String,
        /// Trimmed stderr from the failed invocation.
        stderr: String,
    },

    /// Output was not the JSON shape we expected.
    #[error("unexpected output from `{command}`: {reason}")]
    Parse {
        /// The command line whose output was rejected.
        command: String,
        /// What was wrong with the payload.
        reason: String,
    },

    /// Writing a params/bundle scratch file failed.
    #[error("failed to stage input file: {0}")]
    Io(#[from] std::io::Error),
}
