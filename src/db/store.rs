// SPDX-License-Identifier: MIT

//! SQLite store with typed operations.
//!
//! Provides high-level operations for:
//! - Visits pending trip assignment (joined with campsite coordinates)
//! - Trip persistence (insert + visit backfill, transactional)
//! - Trip listing/detail/rename for the read API
//! - Aggregate distance stats

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::AppError;
use crate::models::{Trip, TripCandidate, UnassignedVisit};

/// SQLite-backed store.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

/// One row of the trip overview listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TripSummaryRow {
    pub id: i64,
    pub name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(rename = "total_distance")]
    pub total_distance_km: i64,
    pub visit_count: i64,
    /// Comma-joined campsite names, in visit order
    pub campsite_names: String,
}

/// One member campsite of a trip, joined through its visit.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TripCampsiteRow {
    pub visit_id: i64,
    pub campsite_id: i64,
    pub name: String,
    pub location: String,
    pub date_from: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    pub teaser_image: Option<String>,
}

/// Aggregate distance stats across all trips.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DistanceStats {
    pub total_distance_km: i64,
    pub trip_count: i64,
}

impl Store {
    /// Open (creating the file if needed) and ensure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);

        // An in-memory database exists per connection; keep exactly one
        // connection alive so the whole pool sees the same data.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        let store = Self { pool };
        store.init_schema().await?;

        tracing::info!(url = database_url, "Connected to database");
        Ok(store)
    }

    /// Direct pool access, used by integration tests for seeding.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables if they do not exist yet.
    async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::raw_sql(
            r#"
            CREATE TABLE IF NOT EXISTS campsites (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                location TEXT NOT NULL DEFAULT '',
                country TEXT NOT NULL DEFAULT '',
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                teaser_image TEXT
            );

            CREATE TABLE IF NOT EXISTS trips (
                id INTEGER PRIMARY KEY,
                name TEXT,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                total_distance INTEGER NOT NULL,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS visits (
                id INTEGER PRIMARY KEY,
                campsite_id INTEGER NOT NULL REFERENCES campsites(id),
                trip_id INTEGER REFERENCES trips(id),
                date_from TEXT NOT NULL,
                date_to TEXT NOT NULL,
                visit_image TEXT
            );
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ─── Migration Operations ────────────────────────────────────

    /// All visits without a trip assignment, joined with their campsite
    /// coordinates, ordered by start date ascending.
    pub async fn unassigned_visits(&self) -> Result<Vec<UnassignedVisit>, AppError> {
        let visits = sqlx::query_as::<_, UnassignedVisit>(
            r#"
            SELECT
                v.id,
                v.campsite_id,
                v.date_from,
                v.date_to,
                c.latitude,
                c.longitude
            FROM visits v
            JOIN campsites c ON c.id = v.campsite_id
            WHERE v.trip_id IS NULL
            ORDER BY v.date_from ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(visits)
    }

    /// Insert a trip and point its member visits at it.
    ///
    /// Runs in one transaction so a failure leaves every member visit
    /// unassigned and the candidate retryable on the next run.
    pub async fn persist_trip(
        &self,
        candidate: &TripCandidate,
        total_distance_km: i64,
    ) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let trip_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO trips (start_date, end_date, total_distance)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(candidate.start_date)
        .bind(candidate.end_date)
        .bind(total_distance_km)
        .fetch_one(&mut *tx)
        .await?;

        for visit in &candidate.visits {
            sqlx::query("UPDATE visits SET trip_id = ? WHERE id = ?")
                .bind(trip_id)
                .bind(visit.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(trip_id)
    }

    // ─── Trip Read Operations ────────────────────────────────────

    /// Trip overview, newest first.
    pub async fn list_trips(&self) -> Result<Vec<TripSummaryRow>, AppError> {
        let trips = sqlx::query_as::<_, TripSummaryRow>(
            r#"
            SELECT
                t.id,
                t.name,
                t.start_date,
                t.end_date,
                t.total_distance,
                COUNT(v.id) AS visit_count,
                COALESCE(GROUP_CONCAT(c.name ORDER BY v.date_from), '') AS campsite_names
            FROM trips t
            LEFT JOIN visits v ON v.trip_id = t.id
            LEFT JOIN campsites c ON c.id = v.campsite_id
            GROUP BY t.id
            ORDER BY date(t.start_date) DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    /// One trip with its member campsites, or `None` if it does not exist.
    pub async fn get_trip(
        &self,
        trip_id: i64,
    ) -> Result<Option<(Trip, Vec<TripCampsiteRow>)>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            "SELECT id, name, start_date, end_date, total_distance FROM trips WHERE id = ?",
        )
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(trip) = trip else {
            return Ok(None);
        };

        let campsites = sqlx::query_as::<_, TripCampsiteRow>(
            r#"
            SELECT
                v.id AS visit_id,
                c.id AS campsite_id,
                c.name,
                c.location,
                v.date_from,
                c.latitude,
                c.longitude,
                c.teaser_image
            FROM visits v
            JOIN campsites c ON c.id = v.campsite_id
            WHERE v.trip_id = ?
            ORDER BY v.date_from ASC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some((trip, campsites)))
    }

    /// Set a trip's display name. Returns false if the trip does not exist.
    pub async fn rename_trip(&self, trip_id: i64, name: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE trips SET name = ? WHERE id = ?")
            .bind(name)
            .bind(trip_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ─── Stats ───────────────────────────────────────────────────

    /// Total and per-trip distance aggregates.
    pub async fn stats(&self) -> Result<DistanceStats, AppError> {
        let stats = sqlx::query_as::<_, DistanceStats>(
            r#"
            SELECT
                COALESCE(SUM(total_distance), 0) AS total_distance_km,
                COUNT(*) AS trip_count
            FROM trips
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
