// SPDX-License-Identifier: MIT

//! Read API for trips and distance stats.

use crate::db::store::TripCampsiteRow;
use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trips", get(list_trips).put(rename_trip))
        .route("/api/trips/{id}", get(get_trip))
        .route("/api/stats", get(get_stats))
}

// ─── Trip Listing ────────────────────────────────────────────

#[derive(Serialize)]
pub struct TripsResponse {
    pub trips: Vec<TripSummary>,
}

#[derive(Serialize)]
pub struct TripSummary {
    pub id: i64,
    pub name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_distance_km: i64,
    pub visit_count: i64,
    pub campsite_names: Vec<String>,
}

/// List all trips, newest first.
async fn list_trips(State(state): State<Arc<AppState>>) -> Result<Json<TripsResponse>> {
    let rows = state.store.list_trips().await?;

    let trips = rows
        .into_iter()
        .map(|row| TripSummary {
            id: row.id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            total_distance_km: row.total_distance_km,
            visit_count: row.visit_count,
            campsite_names: if row.campsite_names.is_empty() {
                vec![]
            } else {
                row.campsite_names.split(',').map(String::from).collect()
            },
        })
        .collect();

    Ok(Json(TripsResponse { trips }))
}

// ─── Trip Detail ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct TripDetailResponse {
    pub trip: TripDetail,
}

#[derive(Serialize)]
pub struct TripDetail {
    pub id: i64,
    pub name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_distance_km: i64,
    pub campsites: Vec<TripCampsiteRow>,
}

/// Get one trip with its member campsites.
async fn get_trip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TripDetailResponse>> {
    let (trip, campsites) = state
        .store
        .get_trip(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip {}", id)))?;

    Ok(Json(TripDetailResponse {
        trip: TripDetail {
            id: trip.id,
            name: trip.name,
            start_date: trip.start_date,
            end_date: trip.end_date,
            total_distance_km: trip.total_distance_km,
            campsites,
        },
    }))
}

// ─── Trip Rename ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RenameTripRequest {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
pub struct RenameTripResponse {
    pub success: bool,
}

/// Set a trip's display name. The name is independent of the computed
/// dates and distance.
async fn rename_trip(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RenameTripRequest>,
) -> Result<Json<RenameTripResponse>> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("Trip name must not be empty".to_string()));
    }

    let renamed = state.store.rename_trip(body.id, body.name.trim()).await?;
    if !renamed {
        return Err(AppError::NotFound(format!("Trip {}", body.id)));
    }

    Ok(Json(RenameTripResponse { success: true }))
}

// ─── Stats ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatsResponse {
    pub total_distance_km: i64,
    pub trip_count: i64,
    pub average_distance_km: i64,
}

/// Aggregate distance stats across all trips.
async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>> {
    let stats = state.store.stats().await?;

    let average = if stats.trip_count > 0 {
        (stats.total_distance_km as f64 / stats.trip_count as f64).round() as i64
    } else {
        0
    };

    Ok(Json(StatsResponse {
        total_distance_km: stats.total_distance_km,
        trip_count: stats.trip_count,
        average_distance_km: average,
    }))
}
