// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared types and wait primitives for ceph-bench.
//!
//! This crate provides the small pieces every other ceph-bench crate
//! builds on:
//!
//! - [`ModelHandle`] - a typed handle for an orchestrator model
//! - [`wait_until`] - the bounded poll-with-timeout loop used for both
//!   deployment readiness and action completion
//! - [`ScratchFile`] - a temp file removed on drop, used for generated
//!   bundle and action-parameter YAML

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod model;
pub mod scratch;
pub mod wait;

/// Application name of the benchmark charm in a deployed model.
pub const BENCH_APP: &str = "woodpecker";

pub use model::ModelHandle;
pub use scratch::ScratchFile;
pub use wait::{wait_until, Pacer, TokioPacer, WaitConfig, WaitError};
