// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod clustering;
pub mod distance;
pub mod migration;
pub mod rate_limit;
pub mod routing;

pub use distance::TripDistanceCalculator;
pub use migration::{MigrationOrchestrator, MigrationSummary};
pub use rate_limit::RateLimitedExecutor;
pub use routing::{RouteSource, RoutingClient};
