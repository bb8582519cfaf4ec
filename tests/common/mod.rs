// SPDX-License-Identifier: MIT

//! Shared helpers for integration tests.

use camp_log::{
    config::Config,
    db::Store,
    services::{
        MigrationOrchestrator, RateLimitedExecutor, RoutingClient, TripDistanceCalculator,
    },
    AppState,
};
use chrono::NaiveDate;
use std::sync::Arc;

/// In-memory store with the schema applied.
pub async fn create_test_store() -> Store {
    Store::connect("sqlite::memory:")
        .await
        .expect("in-memory store")
}

/// Full test app with a live (but never-called) routing client.
///
/// Endpoints under test here only touch the store; migration tests that need
/// routing behavior build their own orchestrator with a mock route source.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let store = create_test_store().await;

    let executor = RateLimitedExecutor::new(config.requests_per_minute);
    let routing = RoutingClient::new(config.ors_api_key.clone(), executor);
    let calculator = TripDistanceCalculator::new(config.home, routing);
    let migration = MigrationOrchestrator::new(store.clone(), calculator, config.trip_gap_days);

    let state = Arc::new(AppState {
        config,
        store,
        migration,
    });

    (camp_log::routes::create_router(state.clone()), state)
}

pub async fn seed_campsite(store: &Store, id: i64, name: &str, latitude: f64, longitude: f64) {
    sqlx::query(
        "INSERT INTO campsites (id, name, location, country, latitude, longitude)
         VALUES (?, ?, '', '', ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(latitude)
    .bind(longitude)
    .execute(store.pool())
    .await
    .expect("seed campsite");
}

pub async fn seed_visit(store: &Store, id: i64, campsite_id: i64, date_from: &str, date_to: &str) {
    sqlx::query(
        "INSERT INTO visits (id, campsite_id, date_from, date_to) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(campsite_id)
    .bind(date_from)
    .bind(date_to)
    .execute(store.pool())
    .await
    .expect("seed visit");
}

#[allow(dead_code)]
pub async fn visit_trip_id(store: &Store, visit_id: i64) -> Option<i64> {
    sqlx::query_scalar("SELECT trip_id FROM visits WHERE id = ?")
        .bind(visit_id)
        .fetch_one(store.pool())
        .await
        .expect("visit exists")
}

#[allow(dead_code)]
pub async fn trip_row(store: &Store, trip_id: i64) -> (NaiveDate, NaiveDate, i64) {
    sqlx::query_as("SELECT start_date, end_date, total_distance FROM trips WHERE id = ?")
        .bind(trip_id)
        .fetch_one(store.pool())
        .await
        .expect("trip exists")
}

#[allow(dead_code)]
pub async fn trip_count(store: &Store) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM trips")
        .fetch_one(store.pool())
        .await
        .expect("count trips")
}
