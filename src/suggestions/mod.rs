//! Day-by-day itinerary suggestions
//!
//! The matching engine partitions candidate attractions across the trip's
//! days and weather slots; the enrichment pass attaches nearby restaurants.
//!
//! Assignment policy: a day's attraction subset is replicated into every
//! weather slot of that day, re-filtered per slot so an attraction never
//! shows up under a condition or hour it is unsuited for. Each attraction
//! carries at most the single nearest restaurant with a rating of at
//! least 3.

use serde::Serialize;

use crate::models::{Attraction, Restaurant, WeatherSample};

pub mod engine;
pub mod enrich;

pub use engine::{OrderedIdSet, build_itinerary};
pub use enrich::attach_restaurants;

/// One attraction suggestion, optionally enriched with nearby restaurants
#[derive(Debug, Clone, Serialize)]
pub struct AttractionSuggestion {
    pub attraction: Attraction,
    pub restaurant: Vec<Restaurant>,
}

/// One weather slot of a day paired with the attractions eligible for it
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionSlot {
    /// Calendar date of the weather sample, YYYY-MM-DD
    pub date: String,
    /// Lower-cased condition label
    pub weather: String,
    pub day_temp: f64,
    pub feels_like: f64,
    /// Formatted with a unit, e.g. "19.2°C"
    pub low_temp: String,
    pub high_temp: String,
    pub attractions: Vec<AttractionSuggestion>,
    /// Full sample timestamp, e.g. "2025-03-14 09:00:00"
    pub date_time: String,
}

impl SuggestionSlot {
    pub(crate) fn from_sample<'a>(
        sample: &WeatherSample,
        attractions: impl IntoIterator<Item = &'a Attraction>,
    ) -> Self {
        Self {
            date: sample.date().format("%Y-%m-%d").to_string(),
            weather: sample.condition.label().to_string(),
            day_temp: sample.temp,
            feels_like: sample.feels_like,
            low_temp: format!("{}°C", sample.temp_min),
            high_temp: format!("{}°C", sample.temp_max),
            attractions: attractions
                .into_iter()
                .map(|attraction| AttractionSuggestion {
                    attraction: attraction.clone(),
                    restaurant: Vec::new(),
                })
                .collect(),
            date_time: sample.format_timestamp(),
        }
    }
}

/// One day of the itinerary
#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    /// 1-based day index
    pub day: u32,
    pub suggestions: Vec<SuggestionSlot>,
}

impl DayPlan {
    /// Ids of every attraction suggested on this day (with repetition
    /// across slots, since slots share the day's subset)
    #[must_use]
    pub fn attraction_ids(&self) -> Vec<i32> {
        self.suggestions
            .iter()
            .flat_map(|slot| slot.attractions.iter().map(|s| s.attraction.id))
            .collect()
    }
}
