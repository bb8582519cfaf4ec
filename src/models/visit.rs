// SPDX-License-Identifier: MIT

//! Visit types: a dated stay at one campsite.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Waypoint;

/// A visit as stored in the database.
///
/// `trip_id` is null until the migration assigns the visit to a trip;
/// a visit belongs to at most one trip at a time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Visit {
    pub id: i64,
    pub campsite_id: i64,
    pub trip_id: Option<i64>,
    /// Inclusive calendar range, `date_from <= date_to`
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub visit_image: Option<String>,
}

/// A visit without a trip assignment, joined with its campsite coordinates.
///
/// This is the row shape the migration works on: everything clustering and
/// distance calculation need, nothing else.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct UnassignedVisit {
    pub id: i64,
    pub campsite_id: i64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
}

impl UnassignedVisit {
    pub fn waypoint(&self) -> Waypoint {
        Waypoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
