// SPDX-License-Identifier: MIT

//! Administrative trigger for the trip migration.

use crate::error::Result;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/migrate", get(run_migration))
}

/// Migration summary returned to the admin UI.
#[derive(Serialize)]
pub struct MigrateResponse {
    pub message: String,
    pub processed: usize,
    pub total: usize,
}

/// Run the visit-to-trip migration and report its counts.
///
/// Partial failure is visible as `processed < total`; skipped trips stay
/// unassigned and are retried on the next call. A run that cannot start at
/// all surfaces as a 500 `{error, details}` response.
async fn run_migration(State(state): State<Arc<AppState>>) -> Result<Json<MigrateResponse>> {
    tracing::info!("Migration triggered");

    let summary = state.migration.run().await?;

    let message = if summary.total == 0 {
        "No new visits to process. All visits are already assigned to trips.".to_string()
    } else {
        "Migration completed successfully!".to_string()
    };

    Ok(Json(MigrateResponse {
        message,
        processed: summary.processed,
        total: summary.total,
    }))
}
