// SPDX-License-Identifier: MIT

//! Campsite and waypoint types.

use serde::{Deserialize, Serialize};

/// A campsite as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Campsite {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub country: String,
    /// WGS84 decimal degrees
    pub latitude: f64,
    pub longitude: f64,
    pub teaser_image: Option<String>,
}

/// A latitude/longitude pair used as routing input. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl Waypoint {
    /// OpenRouteService expects coordinates as `[longitude, latitude]`.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}
