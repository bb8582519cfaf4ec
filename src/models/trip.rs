// SPDX-License-Identifier: MIT

//! Trip types: a maximal run of visits with no gap day between stays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::UnassignedVisit;

/// A trip as stored in the database.
///
/// `start_date`/`end_date`/`total_distance_km` are computed from the member
/// visits by the migration; `name` is user-editable and independent of them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Trip {
    pub id: i64,
    pub name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(rename = "total_distance")]
    pub total_distance_km: i64,
}

/// A clustered group of visits that has not been persisted yet.
///
/// Produced by [`crate::services::clustering::group_into_trips`]; member
/// visits are in chronological order and `start_date <= end_date` holds for
/// any non-empty candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCandidate {
    pub visits: Vec<UnassignedVisit>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
