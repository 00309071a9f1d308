//! Restaurant lookup near an attraction
//!
//! A trait seam so the suggestion pipeline can run with enrichment disabled
//! (no Places API key configured) or against a stub in tests.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::Result;
use crate::config::PlacesConfig;
use crate::models::Restaurant;

/// Source of restaurants near a coordinate
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    async fn nearby_restaurants(&self, latitude: f64, longitude: f64) -> Result<Vec<Restaurant>>;
}

/// HTTP client for the Google Places nearby search API
pub struct PlacesClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    radius_m: u32,
}

/// Nearby search response
#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    vicinity: Option<String>,
    #[serde(default)]
    rating: f64,
    geometry: PlaceGeometry,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: PlacePoint,
}

#[derive(Debug, Deserialize)]
struct PlacePoint {
    lat: f64,
    lng: f64,
}

impl PlacesClient {
    /// Create a new places client
    pub fn new(config: &PlacesConfig, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("tripplanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.clone(),
            radius_m: config.radius_m,
        })
    }
}

#[async_trait]
impl RestaurantSource for PlacesClient {
    #[instrument(skip(self))]
    async fn nearby_restaurants(&self, latitude: f64, longitude: f64) -> Result<Vec<Restaurant>> {
        let url = format!(
            "{}/nearbysearch/json?location={latitude},{longitude}&radius={}&type=restaurant&key={}",
            self.base_url, self.radius_m, self.api_key
        );

        let response: NearbySearchResponse = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| "Failed to parse places response")?;

        debug!(
            "{} restaurants near {latitude:.4}, {longitude:.4}",
            response.results.len()
        );

        Ok(response
            .results
            .into_iter()
            .map(|place| Restaurant {
                name: place.name,
                address: place.vicinity,
                rating: place.rating,
                latitude: place.geometry.location.lat,
                longitude: place.geometry.location.lng,
                distance_km: None,
            })
            .collect())
    }
}

/// Restaurant source used when no Places API key is configured
pub struct DisabledRestaurantSource;

#[async_trait]
impl RestaurantSource for DisabledRestaurantSource {
    async fn nearby_restaurants(&self, _latitude: f64, _longitude: f64) -> Result<Vec<Restaurant>> {
        Ok(Vec::new())
    }
}
