// SPDX-License-Identifier: MIT

//! Round-trip distance calculation for a trip.
//!
//! A trip always starts and ends at the configured home location. Distances
//! are fetched one leg at a time: each request stays small, fails
//! independently, and matches the provider's per-route rate accounting.

use crate::error::AppError;
use crate::models::{UnassignedVisit, Waypoint};
use crate::services::routing::RouteSource;

/// Computes a trip's total driving distance from its member visits.
#[derive(Clone)]
pub struct TripDistanceCalculator<R> {
    home: Waypoint,
    routes: R,
}

impl<R: RouteSource> TripDistanceCalculator<R> {
    pub fn new(home: Waypoint, routes: R) -> Self {
        Self { home, routes }
    }

    /// Total distance in whole kilometers for the leg sequence
    /// home → first campsite → … → last campsite → home.
    ///
    /// `visits` must already be in chronological order (the clusterer's
    /// output is). Legs between identical coordinates are skipped as zero.
    /// Any failing leg fails the whole trip; nothing partial is returned.
    pub async fn trip_distance_km(&self, visits: &[UnassignedVisit]) -> Result<i64, AppError> {
        if visits.is_empty() {
            return Ok(0);
        }

        let mut waypoints = Vec::with_capacity(visits.len() + 2);
        waypoints.push(self.home);
        waypoints.extend(visits.iter().map(|v| v.waypoint()));
        waypoints.push(self.home);

        let mut total_km = 0.0;
        for leg in waypoints.windows(2) {
            if leg[0] == leg[1] {
                tracing::debug!("Skipping leg between identical coordinates");
                continue;
            }
            total_km += self.routes.route_distance_km(leg).await?;
        }

        if !total_km.is_finite() {
            return Err(AppError::Calculation(format!(
                "Trip distance is not a finite number: {}",
                total_km
            )));
        }

        Ok(total_km.round() as i64)
    }
}
