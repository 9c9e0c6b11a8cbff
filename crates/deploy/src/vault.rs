// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Vault bring-up for the gateway stack.
//!
//! A freshly deployed vault charm sits blocked until the Vault server is
//! initialized, unsealed, and the charm is authorized against it - none
//! of which the orchestrator does on its own. [`bootstrap`] performs the
//! minimal single-key ceremony: init with one share, unseal with it, then
//! hand the root token to the charm's `authorize-charm` action.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use ceph_bench_core::{wait_until, ModelHandle, Pacer, WaitConfig, WaitError};
use ceph_bench_juju::{JujuClient, JujuError, TaskStatus};

/// Ways Vault bring-up can fail.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The Vault HTTP API call failed.
    #[error("vault api error: {0}")]
    Http(#[from] reqwest::Error),

    /// Init returned no unseal key.
    #[error("vault init returned no unseal keys")]
    NoUnsealKey,

    /// The server still reports sealed after unsealing.
    #[error("vault remains sealed after unseal")]
    StillSealed,

    /// The vault unit never published an address, or the authorize
    /// action never finished.
    #[error("vault bring-up timed out after {0:?}")]
    Timeout(Duration),

    /// The `authorize-charm` action did not complete.
    #[error("authorize-charm failed: {0}")]
    Authorize(String),

    /// The orchestrator failed underneath us.
    #[error(transparent)]
    Client(#[from] JujuError),
}

#[derive(Debug, Serialize)]
struct InitRequest {
    secret_shares: u32,
    secret_threshold: u32,
}

#[derive(Debug, Deserialize)]
struct InitResponse {
    #[serde(default)]
    keys: Vec<String>,
    root_token: String,
}

#[derive(Debug, Deserialize)]
struct UnsealResponse {
    sealed: bool,
}

/// Thin client for one Vault server's HTTP API.
#[derive(Debug, Clone)]
pub struct VaultFacade {
    http: reqwest::Client,
    base: String,
}

impl VaultFacade {
    /// Talk to the Vault server on the given unit address.
    pub fn new(address: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("http://{address}:8200/v1"),
        }
    }

    /// Initialize the server with a single unseal share.
    ///
    /// Returns the unseal key and root token. A benchmark model is
    /// throwaway, so nothing is persisted.
    pub async fn initialize(&self) -> Result<(String, String), VaultError> {
        let response: InitResponse = self
            .http
            .put(format!("{}/sys/init", self.base))
            .json(&InitRequest {
                secret_shares: 1,
                secret_threshold: 1,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let key = response
            .keys
            .into_iter()
            .next()
            .ok_or(VaultError::NoUnsealKey)?;
        Ok((key, response.root_token))
    }

    /// Unseal the server with the given key.
    pub async fn unseal(&self, key: &str) -> Result<(), VaultError> {
        let mut body = BTreeMap::new();
        body.insert("key", key);
        let response: UnsealResponse = self
            .http
            .put(format!("{}/sys/unseal", self.base))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.sealed {
            return Err(VaultError::StillSealed);
        }
        Ok(())
    }
}

/// Initialize, unseal, and authorize the vault charm in `model`.
pub async fn bootstrap(
    client: &dyn JujuClient,
    model: &ModelHandle,
    wait: &WaitConfig,
    pacer: &dyn Pacer,
) -> Result<(), VaultError> {
    // The unit has to exist and publish an address before the HTTP API
    // is reachable.
    let (unit, address) = wait_until(wait, pacer, || async move {
        let status = client.status(model.as_str()).await?;
        Ok::<_, VaultError>(status.units_of("vault").into_iter().find_map(|(name, u)| {
            u.public_address
                .clone()
                .map(|addr| (name.to_string(), addr))
        }))
    })
    .await
    .map_err(flatten_wait)?;

    info!(%unit, %address, "initializing vault");
    let facade = VaultFacade::new(&address);
    let (unseal_key, root_token) = facade.initialize().await?;
    facade.unseal(&unseal_key).await?;

    let mut params = BTreeMap::new();
    params.insert("token".to_string(), Value::from(root_token));
    let task = client
        .start_action(model.as_str(), &unit, "authorize-charm", &params)
        .await?;

    let outcome = wait_until(wait, pacer, || {
        let task = task.clone();
        async move {
            let outcome = client.task_outcome(model.as_str(), &task).await?;
            Ok::<_, VaultError>(outcome.status.is_terminal().then_some(outcome))
        }
    })
    .await
    .map_err(flatten_wait)?;

    if outcome.status != TaskStatus::Completed {
        return Err(VaultError::Authorize(
            outcome.message.unwrap_or_else(|| "action did not complete".to_string()),
        ));
    }
    info!(%unit, "vault charm authorized");
    Ok(())
}

fn flatten_wait(err: WaitError<VaultError>) -> VaultError {
    match err {
        WaitError::TimedOut(waited) => VaultError::Timeout(waited),
        WaitError::Failed(inner) => inner,
    }
}
