// SPDX-License-Identifier: MIT

//! OpenRouteService client for driving-route distances.
//!
//! Every outbound call is funneled through the shared [`RateLimitedExecutor`];
//! the provider enforces a ceiling of roughly 40 requests per minute and
//! answers 429 beyond it.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Waypoint;
use crate::services::RateLimitedExecutor;

const DIRECTIONS_URL: &str = "https://api.openrouteservice.org/v2/directions/driving-car";

/// Source of point-to-point driving distances.
///
/// Seam for tests: the distance calculator is generic over this trait so it
/// can run against a mock instead of the live provider.
pub trait RouteSource {
    /// Driving distance in kilometers along `waypoints`, in order.
    fn route_distance_km(
        &self,
        waypoints: &[Waypoint],
    ) -> impl std::future::Future<Output = Result<f64, AppError>> + Send;
}

/// OpenRouteService directions client.
#[derive(Clone)]
pub struct RoutingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    executor: RateLimitedExecutor,
}

/// Request body for the directions endpoint.
#[derive(Serialize)]
struct DirectionsRequest {
    /// `[longitude, latitude]` pairs
    coordinates: Vec<[f64; 2]>,
    profile: &'static str,
    format: &'static str,
}

/// Directions response, reduced to the fields we read.
#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    summary: RouteSummary,
}

#[derive(Deserialize)]
struct RouteSummary {
    /// Meters
    distance: f64,
}

impl RoutingClient {
    /// Create a new client sharing the given executor.
    pub fn new(api_key: String, executor: RateLimitedExecutor) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DIRECTIONS_URL.to_string(),
            api_key,
            executor,
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl RouteSource for RoutingClient {
    async fn route_distance_km(&self, waypoints: &[Waypoint]) -> Result<f64, AppError> {
        if waypoints.len() < 2 {
            return Err(AppError::BadRequest(
                "A route needs at least two waypoints".to_string(),
            ));
        }

        let body = DirectionsRequest {
            coordinates: waypoints.iter().map(|w| w.to_lon_lat()).collect(),
            profile: "driving-car",
            format: "json",
        };

        // The job must own everything it touches; it may outlive this borrow.
        let http = self.http.clone();
        let url = self.base_url.clone();
        let api_key = self.api_key.clone();

        let meters = self
            .executor
            .submit(move || async move {
                let response = http
                    .post(&url)
                    .header(reqwest::header::AUTHORIZATION, api_key)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| AppError::Provider(e.to_string()))?;

                extract_distance_meters(response).await
            })
            .await?;

        Ok(meters / 1000.0)
    }
}

/// Check the response status and pull the route summary distance out.
async fn extract_distance_meters(response: reqwest::Response) -> Result<f64, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("OpenRouteService rate limit hit (429)");
        }

        return Err(AppError::Provider(format!("HTTP {}: {}", status, body)));
    }

    let parsed: DirectionsResponse = response
        .json()
        .await
        .map_err(|e| AppError::Provider(format!("JSON parse error: {}", e)))?;

    parsed
        .routes
        .first()
        .map(|route| route.summary.distance)
        .ok_or_else(|| AppError::Provider("Response contains no routes".to_string()))
}
