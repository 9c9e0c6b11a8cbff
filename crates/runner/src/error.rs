//! Benchmark error taxonomy.

use std::time::Duration;

use thiserror::Error;

use ceph_bench_juju::JujuError;

/// Ways a benchmark run can fail.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The KEY VALUE parameter list was malformed on the command line.
    #[error("parameters must come in KEY VALUE pairs; `{0}` has no value")]
    DanglingKey(String),

    /// The benchmark application has no units in the target model.
    #[error("application `{0}` has no units in the target model")]
    NoUnits(String),

    /// The orchestrator reported the action did not succeed.
    #[error("benchmark action failed: {0}")]
    ActionFailed(String),

    /// The result payload was missing a field or held a non-numeric
    /// value.
    #[error("malformed benchmark result: field `{field}` is missing or non-numeric")]
    MalformedResult {
        /// The payload key that could not be read.
        field: &'static str,
    },

    /// The action never reached a terminal state within the budget.
    #[error("benchmark timed out after {0:?}")]
    Timeout(Duration),

    /// The orchestrator failed underneath us.
    #[error(transparent)]
    Client(#[from] JujuError),
}
