//! Scan-job status polling.
//!
//! DESIGN
//! ======
//! A spawned tokio task fetches the job, publishes the snapshot on a
//! `watch` channel, and sleeps the fixed interval only while the job is
//! non-terminal. The first terminal observation fires one toast and one
//! round of cache invalidation per job id, shared across every poll of
//! that job through the poller's notified set.
//!
//! ERROR HANDLING
//! ==============
//! A transient failure (transport, 5xx) after a snapshot exists is logged
//! and leaves the published state as it was; the next attempt happens at
//! the normal interval with no early retry and no backoff. A 4xx answer
//! (missing job, expired session) or any failure before the first snapshot
//! publishes [`PollState::Stopped`] and ends the task, which closes the
//! channel.
//!
//! TRADE-OFFS
//! ==========
//! No jitter: a handful of concurrent pollers per user does not need it.

#[cfg(test)]
#[path = "scan_status_test.rs"]
mod scan_status_test;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::net::error::ApiError;
use crate::net::types::{ScanJob, ScanStatus};
use crate::notify::{Notifier, Toast};
use crate::query::client::QueryClient;
use crate::query::keys::{self, resources, scan_extra, scans, violations};

pub const SCAN_FAILED_FALLBACK: &str = "The scan encountered an error";

/// Where the poller gets job snapshots from.
#[async_trait]
pub trait ScanJobSource: Send + Sync {
    async fn fetch_job(&self, job_id: &str) -> Result<ScanJob, ApiError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollState {
    /// No fetch has succeeded yet.
    Loading,
    Observed(ScanJob),
    /// Polling gave up; carries the error text.
    Stopped(String),
}

impl PollState {
    #[must_use]
    pub fn job(&self) -> Option<&ScanJob> {
        match self {
            Self::Loading | Self::Stopped(_) => None,
            Self::Observed(job) => Some(job),
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.job().is_some_and(|job| job.status.is_terminal())
    }
}

/// Delay before the next fetch: `Some(every)` only while the last snapshot
/// is non-terminal. Without a snapshot there is nothing to poll.
#[must_use]
pub fn refetch_interval(job: Option<&ScanJob>, every: Duration) -> Option<Duration> {
    match job.map(|j| j.status) {
        Some(ScanStatus::Pending | ScanStatus::Running) => Some(every),
        None | Some(ScanStatus::Success | ScanStatus::Failed) => None,
    }
}

/// Toast for a terminal job; `None` for non-terminal states.
#[must_use]
pub fn completion_toast(job: &ScanJob) -> Option<Toast> {
    match job.status {
        ScanStatus::Success => Some(Toast::success(
            "Scan Completed",
            format!("Found {} violations across {} resources", job.violations_found, job.resources_scanned),
        )),
        ScanStatus::Failed => Some(Toast::error(
            "Scan Failed",
            job.error_message.clone().unwrap_or_else(|| SCAN_FAILED_FALLBACK.to_owned()),
        )),
        ScanStatus::Pending | ScanStatus::Running => None,
    }
}

#[derive(Clone)]
pub struct ScanStatusPoller {
    source: Arc<dyn ScanJobSource>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
    notified: Arc<Mutex<HashSet<String>>>,
    queries: Option<QueryClient>,
}

impl ScanStatusPoller {
    #[must_use]
    pub fn new(source: Arc<dyn ScanJobSource>, notifier: Arc<dyn Notifier>, interval: Duration) -> Self {
        Self { source, notifier, interval, notified: Arc::default(), queries: None }
    }

    /// Invalidate scan, violation and resource queries at terminal state.
    #[must_use]
    pub fn with_query_client(mut self, queries: QueryClient) -> Self {
        self.queries = Some(queries);
        self
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn has_notified(&self, job_id: &str) -> bool {
        self.notified.lock().unwrap_or_else(PoisonError::into_inner).contains(job_id)
    }

    /// Start polling `job_id`. Must be called inside a tokio runtime.
    pub fn spawn(&self, job_id: &str) -> PollHandle {
        let (tx, rx) = watch::channel(PollState::Loading);
        let poller = self.clone();
        let job_id = job_id.to_owned();
        info!(%job_id, interval_ms = self.interval.as_millis(), "poll: started");
        let task = tokio::spawn(async move { poller.run(job_id, tx).await });
        PollHandle { rx, task }
    }

    async fn run(self, job_id: String, tx: watch::Sender<PollState>) {
        loop {
            match self.source.fetch_job(&job_id).await {
                Ok(job) => {
                    debug!(%job_id, status = job.status.as_str(), "poll: observed");
                    tx.send_replace(PollState::Observed(job.clone()));
                    if job.status.is_terminal() {
                        self.finish(&job);
                    }
                }
                Err(e) => {
                    let has_snapshot = tx.borrow().job().is_some();
                    if e.is_permanent_client_error() || !has_snapshot {
                        warn!(%job_id, error = %e, "poll: stopped on fetch error");
                        tx.send_replace(PollState::Stopped(e.to_string()));
                        return;
                    }
                    warn!(%job_id, error = %e, "poll: fetch failed; keeping last state");
                }
            }

            let delay = refetch_interval(tx.borrow().job(), self.interval);
            let Some(delay) = delay else {
                info!(%job_id, "poll: stopped at terminal state");
                return;
            };
            tokio::time::sleep(delay).await;
        }
    }

    fn finish(&self, job: &ScanJob) {
        let first = self.notified.lock().unwrap_or_else(PoisonError::into_inner).insert(job.id.clone());
        if !first {
            return;
        }
        if let Some(toast) = completion_toast(job) {
            self.notifier.notify(toast);
        }
        if let Some(queries) = &self.queries {
            for key in [
                scan_extra::by_account(&job.account_id),
                scan_extra::latest(&job.account_id),
                scans::all(),
                violations::all(),
                resources::all(),
                keys::compliance_rate(),
            ] {
                queries.invalidate(&key);
            }
        }
    }
}

/// Owner side of a running poll. Dropping it stops the task.
pub struct PollHandle {
    rx: watch::Receiver<PollState>,
    task: JoinHandle<()>,
}

impl PollHandle {
    #[must_use]
    pub fn current(&self) -> PollState {
        self.rx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.rx.clone()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the terminal snapshot. `None` if polling was cancelled or
    /// stopped first.
    pub async fn wait_terminal(&mut self) -> Option<ScanJob> {
        let Ok(state) = self.rx.wait_for(PollState::is_terminal).await else {
            return None;
        };
        state.job().cloned()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
