// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bounded poll-with-timeout.
//!
//! Both waits in this tool - deployment readiness and action completion -
//! are the same loop: query external status, sleep a fixed interval, give
//! up after a maximum elapsed budget. [`wait_until`] is that loop, with
//! the sleep behind the [`Pacer`] trait so tests run without a clock.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Polling interval and overall budget for a wait loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Pause between status polls.
    pub interval: Duration,
    /// Total wait budget before giving up.
    pub max_wait: Duration,
}

impl WaitConfig {
    /// Default budget for deployment readiness: poll every 15s, give up
    /// after 30 minutes.
    pub fn deployment() -> Self {
        Self {
            interval: Duration::from_secs(15),
            max_wait: Duration::from_secs(30 * 60),
        }
    }

    /// Default budget for action completion. Benchmark runs are long, so
    /// the budget is generous: poll every 10s for up to two hours.
    pub fn action() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_wait: Duration::from_secs(2 * 60 * 60),
        }
    }
}

/// Failure modes of a wait loop.
#[derive(Debug, Error)]
pub enum WaitError<E> {
    /// The budget elapsed before the poll reported completion.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// The poll itself failed; waiting further is pointless.
    #[error(transparent)]
    Failed(E),
}

/// Injectable sleep.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Pause for the given duration.
    async fn pause(&self, interval: Duration);
}

/// Production pacer backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

/// Poll until done, pausing `cfg.interval` between attempts.
///
/// `poll` returns `Ok(Some(value))` when the condition is met,
/// `Ok(None)` to keep waiting, or `Err` to abort. Elapsed time is
/// accounted as `interval * polls`, so a test pacer that sleeps for zero
/// time still hits the timeout deterministically.
pub async fn wait_until<F, Fut, T, E>(
    cfg: &WaitConfig,
    pacer: &dyn Pacer,
    mut poll: F,
) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let mut waited = Duration::ZERO;
    loop {
        match poll().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => return Err(WaitError::Failed(e)),
        }

        if waited >= cfg.max_wait {
            return Err(WaitError::TimedOut(waited));
        }
        pacer.pause(cfg.interval).await;
        waited += cfg.interval;
    }
}
