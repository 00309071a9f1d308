//! Stored destination and attraction rows, plus on-demand restaurant results

use serde::{Deserialize, Serialize};

/// A destination row. Loaded by administrative data import, read-only at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Destination {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub best_climate: Option<String>,
    pub ideal_temp_min: Option<f64>,
    pub ideal_temp_max: Option<f64>,
    pub ideal_weather: Option<String>,
}

/// An attraction row. Read-only at runtime; identity is the integer id.
///
/// `ideal_weather` is a free-text descriptor matched as a substring against
/// live weather conditions, `category` a free-text label such as "waterfall".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attraction {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub destination_id: Option<i32>,
    pub best_climate: Option<String>,
    pub ideal_temp_min: Option<f64>,
    pub ideal_temp_max: Option<f64>,
    pub ideal_weather: String,
}

impl Attraction {
    /// True when this attraction is categorized as a waterfall.
    /// Waterfalls carry a time-of-day visiting restriction.
    #[must_use]
    pub fn is_waterfall(&self) -> bool {
        self.category.eq_ignore_ascii_case("waterfall")
    }

    /// Case-insensitive substring test against the ideal-weather text
    #[must_use]
    pub fn ideal_weather_mentions(&self, keyword: &str) -> bool {
        self.ideal_weather
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

/// A restaurant near an attraction. Computed on demand from the places
/// lookup, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub address: Option<String>,
    pub rating: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Great-circle distance from the attraction, filled in by enrichment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}
