// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! The client trait and its `juju`-binary implementation.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use ceph_bench_core::ScratchFile;

use crate::action::{ActionSchemas, ActionTask, EnqueuedOperation, RawTaskOutcome, TaskOutcome};
use crate::error::JujuError;
use crate::status::ModelStatus;

/// Operations ceph-bench needs from the orchestrator.
///
/// The model is always passed explicitly; implementations must not rely
/// on the orchestrator's notion of a current model.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait JujuClient: Send + Sync {
    /// Create a new model. Name collisions are the orchestrator's to
    /// report and surface as [`JujuError::Command`].
    async fn add_model(&self, model: &str) -> Result<(), JujuError>;

    /// Deploy a bundle file into the model.
    async fn deploy_bundle(&self, model: &str, bundle: &Path) -> Result<(), JujuError>;

    /// Fetch current unit status for the model.
    async fn status(&self, model: &str) -> Result<ModelStatus, JujuError>;

    /// Enqueue an action on a unit without waiting for it.
    async fn start_action(
        &self,
        model: &str,
        unit: &str,
        action: &str,
        params: &BTreeMap<String, Value>,
    ) -> Result<ActionTask, JujuError>;

    /// Fetch the current outcome of an enqueued task.
    async fn task_outcome(&self, model: &str, task: &ActionTask)
        -> Result<TaskOutcome, JujuError>;

    /// Fetch the action schemas an application exposes.
    async fn action_schemas(&self, model: &str, app: &str) -> Result<ActionSchemas, JujuError>;
}

/// Production client: shells out to the `juju` binary.
#[derive(Debug, Clone)]
pub struct JujuCli {
    juju_bin: String,
}

impl Default for JujuCli {
    fn default() -> Self {
        Self::new("juju")
    }
}

impl JujuCli {
    /// Use the given binary name or path instead of `juju` from `PATH`.
    pub fn new(juju_bin: impl Into<String>) -> Self {
        Self {
            juju_bin: juju_bin.into(),
        }
    }

    async fn run(&self, args: &[String]) -> Result<String, JujuError> {
        let command = format!("{} {}", self.juju_bin, args.join(" "));
        debug!(%command, "invoking orchestrator");

        let output = Command::new(&self.juju_bin)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| JujuError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(JujuError::Command {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn run_json<T: DeserializeOwned>(&self, args: &[String]) -> Result<T, JujuError> {
        let command = format!("{} {}", self.juju_bin, args.join(" "));
        let stdout = self.run(args).await?;
        serde_json::from_str(&stdout).map_err(|e| JujuError::Parse {
            command,
            reason: e.to_string(),
        })
    }
}

fn add_model_args(model: &str) -> Vec<String> {
    vec!["add-model".into(), model.into()]
}

fn deploy_args(model: &str, bundle: &Path) -> Vec<String> {
    vec![
        "deploy".into(),
        "-m".into(),
        model.into(),
        bundle.display().to_string(),
    ]
}

fn status_args(model: &str) -> Vec<String> {
    vec![
        "status".into(),
        "-m".into(),
        model.into(),
        "--format".into(),
        "json".into(),
    ]
}

fn start_action_args(model: &str, unit: &str, action: &str, params: &Path) -> Vec<String> {
    vec![
        "run".into(),
        "-m".into(),
        model.into(),
        "--background".into(),
        "--params".into(),
        params.display().to_string(),
        "--format".into(),
        "json".into(),
        unit.into(),
        action.into(),
    ]
}

fn show_task_args(model: &str, task_id: &str) -> Vec<String> {
    vec![
        "show-task".into(),
        "-m".into(),
        model.into(),
        "--format".into(),
        "json".into(),
        task_id.into(),
    ]
}

fn action_schemas_args(model: &str, app: &str) -> Vec<String> {
    vec![
        "actions".into(),
        "-m".into(),
        model.into(),
        "--schema".into(),
        "--format".into(),
        "json".into(),
        app.into(),
    ]
}

#[async_trait]
impl JujuClient for JujuCli {
    async fn add_model(&self, model: &str) -> Result<(), JujuError> {
        self.run(&add_model_args(model)).await.map(|_| ())
    }

    async fn deploy_bundle(&self, model: &str, bundle: &Path) -> Result<(), JujuError> {
        self.run(&deploy_args(model, bundle)).await.map(|_| ())
    }

    async fn status(&self, model: &str) -> Result<ModelStatus, JujuError> {
        self.run_json(&status_args(model)).await
    }

    async fn start_action(
        &self,
        model: &str,
        unit: &str,
        action: &str,
        params: &BTreeMap<String, Value>,
    ) -> Result<ActionTask, JujuError> {
        // Parameters travel as a YAML file so schema-coerced types
        // (integers, booleans) survive transport.
        let yaml = serde_yaml::to_string(params)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let scratch = ScratchFile::create("action-params", "yaml", &yaml)?;

        let args = start_action_args(model, unit, action, scratch.path());
        let command = format!("{} {}", self.juju_bin, args.join(" "));
        let op: EnqueuedOperation = self.run_json(&args).await?;

        let task = op.tasks.into_iter().next().ok_or_else(|| JujuError::Parse {
            command,
            reason: "operation enqueued no tasks".to_string(),
        })?;
        Ok(ActionTask {
            id: task.id,
            unit: if task.unit.is_empty() {
                unit.to_string()
            } else {
                task.unit
            },
        })
    }

    async fn task_outcome(
        &self,
        model: &str,
        task: &ActionTask,
    ) -> Result<TaskOutcome, JujuError> {
        let raw: RawTaskOutcome = self.run_json(&show_task_args(model, &task.id)).await?;
        Ok(raw.into())
    }

    async fn action_schemas(&self, model: &str, app: &str) -> Result<ActionSchemas, JujuError> {
        let value: Value = self.run_json(&action_schemas_args(model, app)).await?;
        Ok(ActionSchemas::from_value(&value))
    }
}
