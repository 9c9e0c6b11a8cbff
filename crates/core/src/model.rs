// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Model identity.

use serde::{Deserialize, Serialize};

/// Handle for a model in the external orchestrator.
///
/// A model is the namespace a deployment lives in; everything the tool
/// does is scoped to one, passed explicitly (there is no implicit
/// "current model").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelHandle(String);

impl ModelHandle {
    /// Wrap an existing model name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Generate a fresh `bench-<hex>` model name.
    ///
    /// The suffix is random, so repeated runs without `--model` never
    /// collide in the orchestrator's namespace.
    pub fn generate() -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("bench-{}", &suffix[..8]))
    }

    /// Get the model name as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
