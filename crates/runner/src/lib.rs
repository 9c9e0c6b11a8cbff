//! Benchmark action runner for ceph-bench.
//!
//! Resolves a unit of the benchmark charm, fires a named action with
//! user-supplied parameters, waits for the task to finish, and maps the
//! result payload into the fixed nine-metric [`BenchmarkResult`].

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod coerce;
pub mod error;
pub mod request;
pub mod result;
mod run;

pub use error::BenchError;
pub use request::BenchmarkRequest;
pub use result::BenchmarkResult;
pub use run::run_benchmark;
