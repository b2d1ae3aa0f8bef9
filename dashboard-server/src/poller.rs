//! Periodic refresh of the session's train data.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::feed::{FeedError, FeedOrigin, TrainFeed};
use crate::session::DashboardSession;

/// Default refresh interval, matching the dashboard's update cycle.
const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for the poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl PollerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Outcome of one refresh.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RefreshSummary {
    pub trains: usize,
    pub rejected: usize,
    pub origin: FeedOrigin,
    pub fetched_at: DateTime<Utc>,
}

/// Fetch one batch and apply it to the session.
///
/// The fetch happens without holding the lock; the write lock is taken
/// only to swap in the finished batch. On error the session is untouched.
/// The snapshot is stamped with the batch's own fetch time, so data served
/// from the fallback cache keeps its age.
pub async fn refresh(
    feed: &TrainFeed,
    session: &RwLock<DashboardSession>,
) -> Result<RefreshSummary, FeedError> {
    let batch = feed.fetch().await?;
    let fetched_at = batch.fetched_at;

    let summary = RefreshSummary {
        trains: batch.records.len(),
        rejected: batch.rejected,
        origin: batch.origin,
        fetched_at,
    };

    session.write().await.apply_batch(batch.records, fetched_at);

    tracing::debug!(
        trains = summary.trains,
        rejected = summary.rejected,
        origin = ?summary.origin,
        "applied train batch"
    );

    Ok(summary)
}

/// Background task that refreshes the session on a fixed interval.
pub struct Poller;

impl Poller {
    /// Start polling. The first refresh happens immediately.
    pub fn spawn(
        feed: Arc<TrainFeed>,
        session: Arc<RwLock<DashboardSession>>,
        config: PollerConfig,
    ) -> PollerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = refresh(&feed, &session).await {
                            tracing::warn!(error = %e, "train refresh failed");
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::debug!("poller stopped");
        });

        PollerHandle {
            stop: stop_tx,
            task: Some(task),
        }
    }
}

/// Handle to a running poller.
///
/// Call [`shutdown`](PollerHandle::shutdown) to stop it cleanly. Dropping
/// the handle aborts the task.
pub struct PollerHandle {
    stop: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Signal the poller to stop and wait for it to finish.
    ///
    /// A refresh already in flight completes first.
    pub async fn shutdown(mut self) {
        let _ = self.stop.send(true);
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::warn!(error = %e, "poller task failed");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
