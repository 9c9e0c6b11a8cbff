// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Action execution payloads: enqueued tasks, task outcomes, schemas.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Handle for one enqueued action task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTask {
    /// Task id assigned by the orchestrator.
    pub id: String,
    /// Unit the task was enqueued on.
    pub unit: String,
}

/// `juju run --background --format json` output: the operation wrapper
/// with the per-unit tasks it scheduled.
#[derive(Debug, Deserialize)]
pub(crate) struct EnqueuedOperation {
    #[serde(default)]
    pub tasks: Vec<EnqueuedTask>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnqueuedTask {
    pub id: String,
    #[serde(default)]
    pub unit: String,
}

/// Terminal and in-flight task states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Still queued or executing.
    Running,
    /// Finished successfully; results are valid.
    Completed,
    /// Finished unsuccessfully.
    Failed,
    /// Aborted before completion.
    Cancelled,
}

impl TaskStatus {
    fn from_str(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            "failed" | "error" => Self::Failed,
            "cancelled" | "aborted" => Self::Cancelled,
            // pending / running / aborting / anything newer
            _ => Self::Running,
        }
    }

    /// Whether the task has stopped executing.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Outcome of one task, from `juju show-task --format json`.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// Task state.
    pub status: TaskStatus,
    /// Failure message, when the orchestrator supplied one.
    pub message: Option<String>,
    /// Structured results map produced by the action.
    pub results: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTaskOutcome {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    results: BTreeMap<String, Value>,
}

impl From<RawTaskOutcome> for TaskOutcome {
    fn from(raw: RawTaskOutcome) -> Self {
        Self {
            status: TaskStatus::from_str(&raw.status),
            message: raw.message,
            results: raw.results,
        }
    }
}

/// Declared type of one action parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// JSON integer.
    Integer,
    /// JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// Anything else is passed through as a string.
    String,
}

/// Action schemas for one application, keyed by action name.
///
/// Built from `juju actions <app> --schema --format json`; only the
/// property types are kept, for coercing CLI-supplied string parameters.
#[derive(Debug, Clone, Default)]
pub struct ActionSchemas {
    params: BTreeMap<String, BTreeMap<String, ParamKind>>,
}

impl ActionSchemas {
    /// Declared kind of `key` for `action`, if the schema knows it.
    pub fn kind_of(&self, action: &str, key: &str) -> Option<ParamKind> {
        self.params.get(action)?.get(key).copied()
    }

    pub(crate) fn from_value(value: &Value) -> Self {
        let mut params = BTreeMap::new();
        let Some(actions) = value.as_object() else {
            return Self::default();
        };
        for (action, schema) in actions {
            let mut keys = BTreeMap::new();
            if let Some(props) = schema.get("properties").and_then(Value::as_object) {
                for (key, prop) in props {
                    let kind = match prop.get("type").and_then(Value::as_str) {
                        Some("integer") => ParamKind::Integer,
                        Some("number") => ParamKind::Number,
                        Some("boolean") => ParamKind::Boolean,
                        _ => ParamKind::String,
                    };
                    keys.insert(key.clone(), kind);
                }
            }
            params.insert(action.clone(), keys);
        }
        Self { params }
    }

    #[cfg(any(test, feature = "testing"))]
    /// Build a schema table directly, for tests.
    pub fn from_kinds(action: &str, kinds: &[(&str, ParamKind)]) -> Self {
        let mut params = BTreeMap::new();
        params.insert(
            action.to_string(),
            kinds
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        );
        Self { params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_mapping() {
        assert_eq!(TaskStatus::from_str("completed"), TaskStatus::Completed);
        assert_eq!(TaskStatus::from_str("failed"), TaskStatus::Failed);
        assert_eq!(TaskStatus::from_str("error"), TaskStatus::Failed);
        assert_eq!(TaskStatus::from_str("cancelled"), TaskStatus::Cancelled);
        assert_eq!(TaskStatus::from_str("running"), TaskStatus::Running);
        assert_eq!(TaskStatus::from_str("pending"), TaskStatus::Running);
        assert!(TaskStatus::Completed.is_terminal());
        assert!(!TaskStatus::Running.is_terminal());
    }

    #[test]
    fn parses_task_outcome() {
        let raw: RawTaskOutcome = serde_json::from_str(
            r#"{
                "status": "completed",
                "results": {"elapsed": "12.5", "iops": 4000},
                "timing": {"enqueued": "2026-08-07 10:00:00 +0000 UTC"}
            }"#,
        )
        .unwrap();
        let outcome = TaskOutcome::from(raw);
        assert_eq!(outcome.status, TaskStatus::Completed);
        assert!(outcome.message.is_none());
        assert_eq!(outcome.results["elapsed"], Value::from("12.5"));
    }

    #[test]
    fn parses_failed_outcome_message() {
        let raw: RawTaskOutcome =
            serde_json::from_str(r#"{"status": "failed", "message": "fio exited 1"}"#).unwrap();
        let outcome = TaskOutcome::from(raw);
        assert_eq!(outcome.status, TaskStatus::Failed);
        assert_eq!(outcome.message.as_deref(), Some("fio exited 1"));
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn parses_enqueued_operation() {
        let op: EnqueuedOperation = serde_json::from_str(
            r#"{"operation": "3", "tasks": [{"id": "4", "unit": "woodpecker/0"}]}"#,
        )
        .unwrap();
        assert_eq!(op.tasks[0].id, "4");
        assert_eq!(op.tasks[0].unit, "woodpecker/0");
    }

    #[test]
    fn builds_schema_table() {
        let value = serde_json::json!({
            "fio": {
                "description": "Run fio against the cluster",
                "properties": {
                    "image-size": {"type": "integer"},
                    "runtime": {"type": "number"},
                    "ec-pool": {"type": "boolean"},
                    "disk-format": {"type": "string"},
                    "operation": {}
                }
            }
        });
        let schemas = ActionSchemas::from_value(&value);
        assert_eq!(schemas.kind_of("fio", "image-size"), Some(ParamKind::Integer));
        assert_eq!(schemas.kind_of("fio", "runtime"), Some(ParamKind::Number));
        assert_eq!(schemas.kind_of("fio", "ec-pool"), Some(ParamKind::Boolean));
        assert_eq!(schemas.kind_of("fio", "disk-format"), Some(ParamKind::String));
        assert_eq!(schemas.kind_of("fio", "operation"), Some(ParamKind::String));
        assert_eq!(schemas.kind_of("fio", "unknown"), None);
        assert_eq!(schemas.kind_of("rbd-bench", "image-size"), None);
    }

    #[test]
    fn non_object_schema_payload_is_empty() {
        let schemas = ActionSchemas::from_value(&Value::Null);
        assert_eq!(schemas.kind_of("fio", "image-size"), None);
    }
}
