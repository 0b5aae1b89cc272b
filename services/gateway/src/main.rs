use clap::Parser;
use gateway::config::Config;
use gateway::router::create_router;
use gateway::state::AppState;
use market_data::clock::SystemClock;
use market_data::extremes::ExtremesStore;
use market_data::upstream::UpstreamClient;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        currency = %config.currency,
        "Starting price gateway"
    );

    let upstream = config.upstream();
    if upstream.metals_api_key.is_none() {
        tracing::warn!("METALS_API_KEY not set; price endpoints will report unavailable");
    }

    // Initialize application state
    let prices = UpstreamClient::new(upstream, Arc::new(SystemClock))?;
    let extremes = ExtremesStore::with_system_clock(config.extremes()?);
    let state = AppState::new(Arc::new(prices), Arc::new(extremes));

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(config.bind).await?;

    tracing::info!("Listening on {}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
