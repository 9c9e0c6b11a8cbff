// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Deployment orchestrator for ceph-bench.
//!
//! Turns a [`DeploymentSpec`] into a deployed, settled model: plans the
//! bundle (monitors, OSDs, the woodpecker benchmark charm, optionally the
//! radosgw gateway stack), hands it to the orchestrator, brings up Vault
//! when the gateway stack needs it, and polls until every unit is ready.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod bundle;
mod deploy;
pub mod error;
pub mod spec;
pub mod vault;

pub use deploy::deploy;
pub use error::DeployError;
pub use spec::DeploymentSpec;
