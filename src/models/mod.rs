// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod campsite;
pub mod trip;
pub mod visit;

pub use campsite::{Campsite, Waypoint};
pub use trip::{Trip, TripCandidate};
pub use visit::{UnassignedVisit, Visit};
