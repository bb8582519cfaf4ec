// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.
//!
//! The OpenRouteService key is the only secret; everything else has a
//! sensible local default so the service starts with just `ORS_API_KEY` set.

use std::env;

use crate::models::Waypoint;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string, e.g. `sqlite://camp-log.db`
    pub database_url: String,
    /// OpenRouteService API key
    pub ors_api_key: String,
    /// Fixed home location, start and end of every trip
    pub home: Waypoint,
    /// Self-imposed cap on routing requests per rolling minute.
    /// The provider allows ~40/min; default stays below that.
    pub requests_per_minute: usize,
    /// Maximum whole days between one visit's end and the next visit's start
    /// for both to count as the same trip. 0 = same-day transitions only.
    pub trip_gap_days: i64,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            ors_api_key: "test_api_key".to_string(),
            home: Waypoint {
                latitude: 47.33243,
                longitude: 8.05558,
            },
            requests_per_minute: 35,
            trip_gap_days: 0,
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://camp-log.db".to_string()),
            ors_api_key: env::var("ORS_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("ORS_API_KEY"))?,
            home: Waypoint {
                latitude: parse_env("HOME_LATITUDE", 47.33243)?,
                longitude: parse_env("HOME_LONGITUDE", 8.05558)?,
            },
            requests_per_minute: parse_env("ROUTING_REQUESTS_PER_MINUTE", 35)?,
            trip_gap_days: parse_env("TRIP_GAP_DAYS", 0)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: parse_env("PORT", 8080)?,
        })
    }
}

/// Read an env var and parse it, falling back to `default` when unset.
fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Environment variable {0} could not be parsed")]
    Invalid(&'static str),
}
