//! Geocoding adapter for the OpenCage API
//!
//! Resolves a free-text destination name to coordinates. The first match
//! wins; an empty result set is reported as `None` rather than an error so
//! callers can distinguish "unknown place" from transport failures.

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::config::GeocodingConfig;
use crate::models::Location;

/// HTTP client for the OpenCage geocoding API
pub struct GeocodeClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Top-level geocoding response
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    geometry: Geometry,
    formatted: String,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

impl GeocodeClient {
    /// Create a new geocoding client
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("tripplanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Resolve a destination name to its best-match coordinates.
    /// Returns `None` when the geocoder has no results for the query.
    #[instrument(skip(self))]
    pub async fn resolve(&self, destination: &str) -> Result<Option<Location>> {
        let url = format!(
            "{}?q={}&key={}&limit=5&no_annotations=1",
            self.base_url,
            urlencoding::encode(destination),
            self.api_key
        );

        debug!("Geocoding '{destination}'");

        let response: GeocodingResponse = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| "Failed to parse geocoding response")?;

        match response.results.into_iter().next() {
            Some(first) => {
                info!(
                    "Resolved '{}' to {} ({:.4}, {:.4})",
                    destination, first.formatted, first.geometry.lat, first.geometry.lng
                );
                Ok(Some(Location::new(
                    first.geometry.lat,
                    first.geometry.lng,
                    first.formatted,
                )))
            }
            None => {
                warn!("No geocoding results for '{destination}'");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "results": [
                {"geometry": {"lat": 10.0889, "lng": 77.0595}, "formatted": "Munnar, Kerala, India"},
                {"geometry": {"lat": 48.13, "lng": 11.58}, "formatted": "Somewhere else"}
            ],
            "status": {"code": 200, "message": "OK"}
        }"#;

        let parsed: GeocodingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 2);
        let first = &parsed.results[0];
        assert_eq!(first.formatted, "Munnar, Kerala, India");
        assert!((first.geometry.lat - 10.0889).abs() < 1e-9);
    }

    #[test]
    fn test_empty_results_parse() {
        let body = r#"{"results": [], "status": {"code": 200, "message": "OK"}}"#;
        let parsed: GeocodingResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.results.is_empty());
    }
}
