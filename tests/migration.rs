// SPDX-License-Identifier: MIT

//! Migration integration tests against an in-memory store and mocked routes.

use camp_log::db::Store;
use camp_log::error::AppError;
use camp_log::models::Waypoint;
use camp_log::services::{MigrationOrchestrator, RouteSource, TripDistanceCalculator};
use chrono::NaiveDate;

mod common;

const HOME: Waypoint = Waypoint {
    latitude: 47.33243,
    longitude: 8.05558,
};

/// Every leg is the same fixed distance.
#[derive(Clone)]
struct FixedRoutes(f64);

impl RouteSource for FixedRoutes {
    async fn route_distance_km(&self, _waypoints: &[Waypoint]) -> Result<f64, AppError> {
        Ok(self.0)
    }
}

/// Fails any leg that touches the given latitude, succeeds otherwise.
#[derive(Clone)]
struct FailAtLatitude {
    latitude: f64,
    per_leg_km: f64,
}

impl RouteSource for FailAtLatitude {
    async fn route_distance_km(&self, waypoints: &[Waypoint]) -> Result<f64, AppError> {
        if waypoints.iter().any(|w| w.latitude == self.latitude) {
            return Err(AppError::Provider("no route found".to_string()));
        }
        Ok(self.per_leg_km)
    }
}

fn orchestrator<R: RouteSource>(store: &Store, routes: R) -> MigrationOrchestrator<R> {
    MigrationOrchestrator::new(
        store.clone(),
        TripDistanceCalculator::new(HOME, routes),
        0,
    )
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Three campsites, three visits: A and B share a transition day, C is a
/// month later. Clusters into {A, B} and {C}.
async fn seed_standard_visits(store: &Store) {
    common::seed_campsite(store, 1, "Campsite X", 46.0, 9.0).await;
    common::seed_campsite(store, 2, "Campsite Y", 46.5, 9.5).await;
    common::seed_campsite(store, 3, "Campsite Z", 47.0, 10.0).await;

    common::seed_visit(store, 1, 1, "2023-07-01", "2023-07-03").await;
    common::seed_visit(store, 2, 2, "2023-07-03", "2023-07-05").await;
    common::seed_visit(store, 3, 3, "2023-08-10", "2023-08-12").await;
}

#[tokio::test]
async fn test_empty_database_is_a_noop() {
    let store = common::create_test_store().await;

    let summary = orchestrator(&store, FixedRoutes(100.0)).run().await.unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.total, 0);
    assert_eq!(common::trip_count(&store).await, 0);
}

#[tokio::test]
async fn test_migration_persists_trips_and_backfills_visits() {
    let store = common::create_test_store().await;
    seed_standard_visits(&store).await;

    let summary = orchestrator(&store, FixedRoutes(100.0)).run().await.unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.total, 2);
    assert_eq!(common::trip_count(&store).await, 2);

    let trip_a = common::visit_trip_id(&store, 1).await.expect("visit 1 assigned");
    let trip_b = common::visit_trip_id(&store, 2).await.expect("visit 2 assigned");
    let trip_c = common::visit_trip_id(&store, 3).await.expect("visit 3 assigned");
    assert_eq!(trip_a, trip_b);
    assert_ne!(trip_a, trip_c);

    // First trip: home -> X -> Y -> home, three legs at 100 km each.
    let (start, end, distance) = common::trip_row(&store, trip_a).await;
    assert_eq!(start, date("2023-07-01"));
    assert_eq!(end, date("2023-07-05"));
    assert_eq!(distance, 300);

    // Second trip: home -> Z -> home, two legs.
    let (start, end, distance) = common::trip_row(&store, trip_c).await;
    assert_eq!(start, date("2023-08-10"));
    assert_eq!(end, date("2023-08-12"));
    assert_eq!(distance, 200);
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let store = common::create_test_store().await;
    seed_standard_visits(&store).await;

    let runner = orchestrator(&store, FixedRoutes(100.0));

    let first = runner.run().await.unwrap();
    assert_eq!(first.processed, 2);

    let second = runner.run().await.unwrap();
    assert_eq!(second.processed, 0);
    assert_eq!(second.total, 0);
    assert_eq!(common::trip_count(&store).await, 2);
}

#[tokio::test]
async fn test_failed_candidate_is_skipped_and_retried_next_run() {
    let store = common::create_test_store().await;
    seed_standard_visits(&store).await;

    // Campsite Y sits at latitude 46.5, so the {A, B} candidate fails while
    // {C} goes through.
    let summary = orchestrator(
        &store,
        FailAtLatitude {
            latitude: 46.5,
            per_leg_km: 100.0,
        },
    )
    .run()
    .await
    .unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.total, 2);
    assert_eq!(common::trip_count(&store).await, 1);
    assert_eq!(common::visit_trip_id(&store, 1).await, None);
    assert_eq!(common::visit_trip_id(&store, 2).await, None);
    assert!(common::visit_trip_id(&store, 3).await.is_some());

    // Next run, with the provider healthy again, picks up only the skipped
    // candidate.
    let retry = orchestrator(&store, FixedRoutes(50.0)).run().await.unwrap();
    assert_eq!(retry.processed, 1);
    assert_eq!(retry.total, 1);
    assert_eq!(common::trip_count(&store).await, 2);
    assert!(common::visit_trip_id(&store, 1).await.is_some());
    assert_eq!(
        common::visit_trip_id(&store, 1).await,
        common::visit_trip_id(&store, 2).await
    );
}

#[tokio::test]
async fn test_new_visits_after_first_run_form_new_trips() {
    let store = common::create_test_store().await;
    seed_standard_visits(&store).await;

    let runner = orchestrator(&store, FixedRoutes(100.0));
    runner.run().await.unwrap();

    common::seed_visit(&store, 4, 1, "2023-09-01", "2023-09-03").await;

    let summary = runner.run().await.unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.total, 1);
    assert_eq!(common::trip_count(&store).await, 3);
    assert!(common::visit_trip_id(&store, 4).await.is_some());
}
