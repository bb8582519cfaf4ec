// SPDX-License-Identifier: MIT

//! camp-log API server.
//!
//! Wires the store, the rate-limited routing client and the migration
//! orchestrator together and serves the HTTP API.

use camp_log::{
    config::Config,
    db::Store,
    services::{
        MigrationOrchestrator, RateLimitedExecutor, RoutingClient, TripDistanceCalculator,
    },
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting camp-log API");

    let store = Store::connect(&config.database_url)
        .await
        .expect("Failed to open database");

    // One executor per process; every routing call shares its window.
    let executor = RateLimitedExecutor::new(config.requests_per_minute);
    let routing = RoutingClient::new(config.ors_api_key.clone(), executor);
    let calculator = TripDistanceCalculator::new(config.home, routing);
    let migration = MigrationOrchestrator::new(store.clone(), calculator, config.trip_gap_days);
    tracing::info!(
        requests_per_minute = config.requests_per_minute,
        trip_gap_days = config.trip_gap_days,
        "Migration services initialized"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        migration,
    });

    let app = camp_log::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("camp_log=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
