// SPDX-License-Identifier: MIT

//! Trip migration: derives trips from visits that have none yet.
//!
//! The core workflow:
//! 1. Read unassigned visits with campsite coordinates from the store
//! 2. Cluster them into trip candidates
//! 3. Compute each candidate's round-trip distance
//! 4. Persist the trip and backfill its visits' `trip_id`
//!
//! Safe to re-run: assigned visits are excluded by the initial query, so a
//! second run with no new visits is a no-op.

use serde::Serialize;

use crate::db::Store;
use crate::error::AppError;
use crate::models::TripCandidate;
use crate::services::clustering::group_into_trips;
use crate::services::distance::TripDistanceCalculator;
use crate::services::routing::RouteSource;

/// Counts reported back to the trigger surface.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MigrationSummary {
    /// Candidates successfully persisted
    pub processed: usize,
    /// Candidates found in this run
    pub total: usize,
}

/// Runs the visit-to-trip migration as a batch.
#[derive(Clone)]
pub struct MigrationOrchestrator<R> {
    store: Store,
    calculator: TripDistanceCalculator<R>,
    max_gap_days: i64,
}

impl<R: RouteSource> MigrationOrchestrator<R> {
    pub fn new(store: Store, calculator: TripDistanceCalculator<R>, max_gap_days: i64) -> Self {
        Self {
            store,
            calculator,
            max_gap_days,
        }
    }

    /// Run the migration over all currently unassigned visits.
    ///
    /// Candidates are processed sequentially; one candidate's failure is
    /// logged and skipped, its visits stay unassigned for the next run.
    /// Only a failure of the initial query aborts the whole run.
    pub async fn run(&self) -> Result<MigrationSummary, AppError> {
        let visits = self.store.unassigned_visits().await?;

        if visits.is_empty() {
            tracing::info!("No new visits to process");
            return Ok(MigrationSummary {
                processed: 0,
                total: 0,
            });
        }

        tracing::info!(count = visits.len(), "Found visits without a trip");

        let candidates = group_into_trips(visits, self.max_gap_days);
        let total = candidates.len();
        tracing::info!(trips = total, "Grouped visits into trips");

        let mut processed = 0;
        for (index, candidate) in candidates.iter().enumerate() {
            match self.process_candidate(candidate).await {
                Ok(trip_id) => {
                    tracing::info!(
                        trip = index + 1,
                        trips = total,
                        trip_id,
                        visits = candidate.visits.len(),
                        start = %candidate.start_date,
                        end = %candidate.end_date,
                        "Trip persisted"
                    );
                    processed += 1;
                }
                Err(e) => {
                    tracing::error!(
                        trip = index + 1,
                        trips = total,
                        visits = candidate.visits.len(),
                        error = %e,
                        "Skipping trip, visits stay unassigned"
                    );
                }
            }
        }

        tracing::info!(processed, total, "Migration finished");
        Ok(MigrationSummary { processed, total })
    }

    /// Compute one candidate's distance and persist it atomically.
    async fn process_candidate(&self, candidate: &TripCandidate) -> Result<i64, AppError> {
        let distance_km = self.calculator.trip_distance_km(&candidate.visits).await?;
        self.store.persist_trip(candidate, distance_km).await
    }
}
