//! The benchmark run flow.

use tracing::{info, warn};

use ceph_bench_core::{wait_until, ModelHandle, Pacer, WaitConfig, WaitError, BENCH_APP};
use ceph_bench_juju::{ActionSchemas, JujuClient, TaskStatus};

use crate::coerce::coerce_params;
use crate::error::BenchError;
use crate::request::BenchmarkRequest;
use crate::result::BenchmarkResult;

/// Run a benchmark action in the target model and return its metrics.
///
/// Triggers real I/O load against the deployed cluster. The action is
/// never retried locally; whatever terminal state the orchestrator
/// reports is final.
pub async fn run_benchmark(
    client: &dyn JujuClient,
    model: &ModelHandle,
    request: &BenchmarkRequest,
    wait: &WaitConfig,
    pacer: &dyn Pacer,
) -> Result<BenchmarkResult, BenchError> {
    let unit = resolve_unit(client, model).await?;

    let schemas = match client.action_schemas(model.as_str(), BENCH_APP).await {
        Ok(schemas) => schemas,
        Err(e) => {
            warn!(error = %e, "could not fetch action schemas; passing parameters as strings");
            ActionSchemas::default()
        }
    };
    let params = coerce_params(&schemas, &request.name, &request.params);

    info!(%unit, action = %request.name, "starting benchmark");
    let task = client
        .start_action(model.as_str(), &unit, &request.name, &params)
        .await?;

    let outcome = wait_until(wait, pacer, || {
        let task = task.clone();
        async move {
            let outcome = client.task_outcome(model.as_str(), &task).await?;
            Ok::<_, BenchError>(outcome.status.is_terminal().then_some(outcome))
        }
    })
    .await
    .map_err(|err| match err {
        WaitError::TimedOut(waited) => BenchError::Timeout(waited),
        WaitError::Failed(inner) => inner,
    })?;

    if outcome.status != TaskStatus::Completed {
        return Err(BenchError::ActionFailed(outcome.message.unwrap_or_else(
            || format!("task {} ended without completing", task.id),
        )));
    }
    BenchmarkResult::from_payload(&outcome.results)
}

/// Pick one representative unit of the benchmark application: the
/// leader when one is flagged, otherwise the first unit by name.
async fn resolve_unit(
    client: &dyn JujuClient,
    model: &ModelHandle,
) -> Result<String, BenchError> {
    let status = client.status(model.as_str()).await?;
    status
        .units_of(BENCH_APP)
        .first()
        .map(|(name, _)| name.to_string())
        .ok_or_else(|| BenchError::NoUnits(BENCH_APP.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::Value;

    use ceph_bench_juju::{
        ActionTask, JujuError, MockJujuClient, ModelStatus, ParamKind, StatusInfo, TaskOutcome,
        UnitStatus,
    };

    struct NoopPacer;

    #[async_trait]
    impl Pacer for NoopPacer {
        async fn pause(&self, _interval: Duration) {}
    }

    fn fast_wait() -> WaitConfig {
        WaitConfig {
            interval: Duration::from_secs(1),
            max_wait: Duration::from_secs(3),
        }
    }

    fn bench_status(units: &[(&str, bool)]) -> ModelStatus {
        let mut status = ModelStatus::default();
        let app = status.applications.entry(BENCH_APP.to_string()).or_default();
        for (name, leader) in units {
            app.units.insert(
                name.to_string(),
                UnitStatus {
                    workload: StatusInfo {
                        current: "active".to_string(),
                        message: String::new(),
                    },
                    agent: StatusInfo {
                        current: "idle".to_string(),
                        message: String::new(),
                    },
                    leader: *leader,
                    public_address: None,
                },
            );
        }
        status
    }

    fn full_results() -> BTreeMap<String, Value> {
        serde_json::from_str(
            r#"{
                "elapsed": 12.5, "iops": 4000, "bandwidth": 512000,
                "read_ops": 2000, "read_iops": 2000, "read_bw": 256000,
                "write_ops": 2000, "write_iops": 2000, "write_bw": 256000
            }"#,
        )
        .unwrap()
    }

    fn task() -> ActionTask {
        ActionTask {
            id: "7".to_string(),
            unit: "woodpecker/0".to_string(),
        }
    }

    fn model() -> ModelHandle {
        ModelHandle::new("bench-test")
    }

    #[tokio::test]
    async fn runs_action_and_maps_results() {
        let mut client = MockJujuClient::new();
        client
            .expect_status()
            .returning(|_| Ok(bench_status(&[("woodpecker/0", false)])));
        client.expect_action_schemas().returning(|_, _| {
            Ok(ActionSchemas::from_kinds(
                "fio",
                &[("image-size", ParamKind::Integer)],
            ))
        });
        client
            .expect_start_action()
            .withf(|_, unit, action, params| {
                unit == "woodpecker/0"
                    && action == "fio"
                    && params["image-size"] == Value::from(1024)
            })
            .times(1)
            .returning(|_, _, _, _| Ok(task()));

        // still running on the first poll, completed on the second
        let polls = Arc::new(AtomicU32::new(0));
        let counter = polls.clone();
        client.expect_task_outcome().returning(move |_, _| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(TaskOutcome {
                    status: TaskStatus::Running,
                    message: None,
                    results: BTreeMap::new(),
                })
            } else {
                Ok(TaskOutcome {
                    status: TaskStatus::Completed,
                    message: None,
                    results: full_results(),
                })
            }
        });

        let request = BenchmarkRequest::from_pairs(
            "fio",
            &["image-size".to_string(), "1024".to_string()],
        )
        .unwrap();
        let result = run_benchmark(&client, &model(), &request, &fast_wait(), &NoopPacer)
            .await
            .unwrap();
        assert_eq!(result.elapsed_seconds, 12.5);
        assert_eq!(result.iops, 4000.0);
        assert_eq!(result.write_ops, 2000);
        assert_eq!(polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn prefers_the_leader_unit() {
        let mut client = MockJujuClient::new();
        client.expect_status().returning(|_| {
            Ok(bench_status(&[
                ("woodpecker/0", false),
                ("woodpecker/1", true),
            ]))
        });
        client
            .expect_action_schemas()
            .returning(|_, _| Ok(ActionSchemas::default()));
        client
            .expect_start_action()
            .withf(|_, unit, _, _| unit == "woodpecker/1")
            .times(1)
            .returning(|_, _, _, _| Ok(task()));
        client.expect_task_outcome().returning(|_, _| {
            Ok(TaskOutcome {
                status: TaskStatus::Completed,
                message: None,
                results: full_results(),
            })
        });

        let request = BenchmarkRequest::new("rbd-bench");
        run_benchmark(&client, &model(), &request, &fast_wait(), &NoopPacer)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn schema_failure_passes_strings_through() {
        let mut client = MockJujuClient::new();
        client
            .expect_status()
            .returning(|_| Ok(bench_status(&[("woodpecker/0", false)])));
        client.expect_action_schemas().returning(|_, _| {
            Err(JujuError::Command {
                command: "juju actions".to_string(),
                stderr: "schema unavailable".to_string(),
            })
        });
        client
            .expect_start_action()
            .withf(|_, _, _, params| params["image-size"] == Value::from("1024"))
            .times(1)
            .returning(|_, _, _, _| Ok(task()));
        client.expect_task_outcome().returning(|_, _| {
            Ok(TaskOutcome {
                status: TaskStatus::Completed,
                message: None,
                results: full_results(),
            })
        });

        let request = BenchmarkRequest::from_pairs(
            "fio",
            &["image-size".to_string(), "1024".to_string()],
        )
        .unwrap();
        run_benchmark(&client, &model(), &request, &fast_wait(), &NoopPacer)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_action_surfaces_message() {
        let mut client = MockJujuClient::new();
        client
            .expect_status()
            .returning(|_| Ok(bench_status(&[("woodpecker/0", false)])));
        client
            .expect_action_schemas()
            .returning(|_, _| Ok(ActionSchemas::default()));
        client
            .expect_start_action()
            .returning(|_, _, _, _| Ok(task()));
        client.expect_task_outcome().returning(|_, _| {
            Ok(TaskOutcome {
                status: TaskStatus::Failed,
                message: Some("fio exited 1".to_string()),
                results: BTreeMap::new(),
            })
        });

        let err = run_benchmark(
            &client,
            &model(),
            &BenchmarkRequest::new("fio"),
            &fast_wait(),
            &NoopPacer,
        )
        .await
        .unwrap_err();
        match err {
            BenchError::ActionFailed(message) => assert_eq!(message, "fio exited 1"),
            other => panic!("expected action failure, got {other}"),
        }
    }

    #[tokio::test]
    async fn missing_application_is_an_error() {
        let mut client = MockJujuClient::new();
        client.expect_status().returning(|_| Ok(ModelStatus::default()));

        let err = run_benchmark(
            &client,
            &model(),
            &BenchmarkRequest::new("fio"),
            &fast_wait(),
            &NoopPacer,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BenchError::NoUnits(app) if app == BENCH_APP));
    }

    #[tokio::test]
    async fn stuck_action_times_out() {
        let mut client = MockJujuClient::new();
        client
            .expect_status()
            .returning(|_| Ok(bench_status(&[("woodpecker/0", false)])));
        client
            .expect_action_schemas()
            .returning(|_, _| Ok(ActionSchemas::default()));
        client
            .expect_start_action()
            .returning(|_, _, _, _| Ok(task()));
        client.expect_task_outcome().returning(|_, _| {
            Ok(TaskOutcome {
                status: TaskStatus::Running,
                message: None,
                results: BTreeMap::new(),
            })
        });

        let err = run_benchmark(
            &client,
            &model(),
            &BenchmarkRequest::new("fio"),
            &fast_wait(),
            &NoopPacer,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BenchError::Timeout(_)));
    }

    #[tokio::test]
    async fn malformed_results_are_rejected() {
        let mut client = MockJujuClient::new();
        client
            .expect_status()
            .returning(|_| Ok(bench_status(&[("woodpecker/0", false)])));
        client
            .expect_action_schemas()
            .returning(|_, _| Ok(ActionSchemas::default()));
        client
            .expect_start_action()
            .returning(|_, _, _, _| Ok(task()));
        client.expect_task_outcome().returning(|_, _| {
            let mut results = full_results();
            results.remove("write_bw");
            Ok(TaskOutcome {
                status: TaskStatus::Completed,
                message: None,
                results,
            })
        });

        let err = run_benchmark(
            &client,
            &model(),
            &BenchmarkRequest::new("fio"),
            &fast_wait(),
            &NoopPacer,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            BenchError::MalformedResult { field: "write_bw" }
        ));
    }
}
