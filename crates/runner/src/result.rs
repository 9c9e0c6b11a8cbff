//! The nine-metric benchmark result.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::error::BenchError;

/// Metrics extracted from one completed benchmark action.
///
/// Lives only long enough to be printed; nothing persists it.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    /// Wall-clock benchmark duration in seconds.
    pub elapsed_seconds: f64,
    /// Combined operations per second.
    pub iops: f64,
    /// Combined bandwidth.
    pub bandwidth: f64,
    /// Total read operations.
    pub read_ops: u64,
    /// Read operations per second.
    pub read_iops: f64,
    /// Read bandwidth.
    pub read_bandwidth: f64,
    /// Total write operations.
    pub write_ops: u64,
    /// Write operations per second.
    pub write_iops: f64,
    /// Write bandwidth.
    pub write_bandwidth: f64,
}

impl BenchmarkResult {
    /// Extract the nine fixed fields from an action results payload.
    ///
    /// The orchestrator may deliver values as JSON numbers or as numeric
    /// strings; both are accepted. A missing or non-numeric field fails
    /// with [`BenchError::MalformedResult`].
    pub fn from_payload(payload: &BTreeMap<String, Value>) -> Result<Self, BenchError> {
        Ok(Self {
            elapsed_seconds: float_field(payload, "elapsed")?,
            iops: float_field(payload, "iops")?,
            bandwidth: float_field(payload, "bandwidth")?,
            read_ops: count_field(payload, "read_ops")?,
            read_iops: float_field(payload, "read_iops")?,
            read_bandwidth: float_field(payload, "read_bw")?,
            write_ops: count_field(payload, "write_ops")?,
            write_iops: float_field(payload, "write_iops")?,
            write_bandwidth: float_field(payload, "write_bw")?,
        })
    }
}

fn float_field(payload: &BTreeMap<String, Value>, field: &'static str) -> Result<f64, BenchError> {
    payload
        .get(field)
        .and_then(as_f64)
        .ok_or(BenchError::MalformedResult { field })
}

fn count_field(payload: &BTreeMap<String, Value>, field: &'static str) -> Result<u64, BenchError> {
    let value = float_field(payload, field)?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(BenchError::MalformedResult { field });
    }
    Ok(value as u64)
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Elapsed time: {}", self.elapsed_seconds)?;
        writeln!(f, "Ops per second: {}", self.iops)?;
        writeln!(f, "Bandwidth: {}", self.bandwidth)?;
        writeln!(f, "Read ops: {}", self.read_ops)?;
        writeln!(f, "Read ops per second: {}", self.read_iops)?;
        writeln!(f, "Read bandwidth: {}", self.read_bandwidth)?;
        writeln!(f, "Write ops: {}", self.write_ops)?;
        writeln!(f, "Write ops per second: {}", self.write_iops)?;
        write!(f, "Write bandwidth: {}", self.write_bandwidth)
    }
}
