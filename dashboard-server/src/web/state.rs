//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::feed::TrainFeed;
use crate::session::DashboardSession;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The dashboard session, shared with the poller
    pub session: Arc<RwLock<DashboardSession>>,

    /// Train data source, used for on-demand refreshes
    pub feed: Arc<TrainFeed>,

    /// How often the page should poll for new data
    pub poll_interval: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(session: Arc<RwLock<DashboardSession>>, feed: Arc<TrainFeed>) -> Self {
        Self {
            session,
            feed,
            poll_interval: Duration::from_secs(30),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
