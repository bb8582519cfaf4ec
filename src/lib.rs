// SPDX-License-Identifier: MIT

//! camp-log: backend for a personal camping-trip logbook.
//!
//! Derives trips from dated campsite visits (temporal clustering plus
//! round-trip driving distance via OpenRouteService) and serves a small
//! read API over the resulting trips.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Store;
use services::{MigrationOrchestrator, RoutingClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub migration: MigrationOrchestrator<RoutingClient>,
}
