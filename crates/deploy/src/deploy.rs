// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! The deployment flow.

use tracing::{debug, info};

use ceph_bench_core::{wait_until, ModelHandle, Pacer, ScratchFile, WaitConfig, WaitError};
use ceph_bench_juju::JujuClient;

use crate::bundle::plan;
use crate::error::DeployError;
use crate::spec::DeploymentSpec;
use crate::vault;

/// Deploy a benchmark model and block until every unit is ready.
///
/// Not idempotent: rerunning with the same explicit model name makes the
/// orchestrator report a collision, surfaced as [`DeployError::Client`].
pub async fn deploy(
    client: &dyn JujuClient,
    spec: &DeploymentSpec,
    wait: &WaitConfig,
    pacer: &dyn Pacer,
) -> Result<ModelHandle, DeployError> {
    spec.validate()?;

    let model = spec
        .model
        .clone()
        .map(ModelHandle::new)
        .unwrap_or_else(ModelHandle::generate);
    info!(model = %model, osds = spec.osd_count, gateway = spec.deploy_gateway, "deploying");

    let bundle = serde_yaml::to_string(&plan(spec))?;
    let scratch = ScratchFile::create("bundle", "yaml", &bundle)?;

    client.add_model(model.as_str()).await?;
    client.deploy_bundle(model.as_str(), scratch.path()).await?;

    if spec.deploy_gateway {
        vault::bootstrap(client, &model, wait, pacer).await?;
    }

    wait_for_ready(client, &model, wait, pacer).await?;
    info!(model = %model, "all units ready");
    Ok(model)
}

/// Poll model status until every unit reports active/idle.
async fn wait_for_ready(
    client: &dyn JujuClient,
    model: &ModelHandle,
    wait: &WaitConfig,
    pacer: &dyn Pacer,
) -> Result<(), DeployError> {
    wait_until(wait, pacer, || async move {
        let status = client.status(model.as_str()).await?;
        if status.all_units_ready() {
            return Ok(Some(()));
        }
        let pending: usize = status
            .applications
            .values()
            .flat_map(|a| a.units.values())
            .filter(|u| !u.is_ready())
            .count();
        debug!(model = %model, pending, "units still settling");
        Ok(None)
    })
    .await
    .map_err(|err| match err {
        WaitError::TimedOut(waited) => DeployError::Timeout(waited),
        WaitError::Failed(inner) => inner,
    })
}
