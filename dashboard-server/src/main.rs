use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

use dashboard_server::cache::{CacheConfig, CachedTrainClient};
use dashboard_server::config::{DashboardConfig, FeedSource};
use dashboard_server::feed::{
    FeedCache, FeedCacheConfig, FeedConfig, MockTrainFeed, TrainClient, TrainFeed,
};
use dashboard_server::network::StationRegistry;
use dashboard_server::poller::{Poller, PollerConfig};
use dashboard_server::session::DashboardSession;
use dashboard_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dashboard_server=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "dashboard server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env()?;

    let registry = Arc::new(StationRegistry::marta()?);
    tracing::info!(stations = registry.len(), "loaded MARTA network");

    let feed = match &config.feed {
        FeedSource::Live { api_key, base_url } => {
            let client = TrainClient::new(FeedConfig::new(api_key).with_base_url(base_url))?;
            tracing::info!(endpoint = client.endpoint(), "using live train feed");
            TrainFeed::Live {
                client: CachedTrainClient::new(client, &CacheConfig::default()),
                fallback: FeedCache::new(FeedCacheConfig::new(&config.cache_file)),
            }
        }
        FeedSource::Mock { path } => TrainFeed::Mock(MockTrainFeed::load(path)?),
    };
    let feed = Arc::new(feed);

    let session = Arc::new(RwLock::new(DashboardSession::new(registry)));

    let poller = Poller::spawn(
        feed.clone(),
        session.clone(),
        PollerConfig::default().with_interval(config.refresh_interval),
    );

    let state = AppState::new(session, feed).with_poll_interval(config.refresh_interval);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("MARTA dashboard listening on http://{}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.shutdown().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
