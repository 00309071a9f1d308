//! The attraction-matching core
//!
//! For every weather sample, candidate attractions are filtered by weather
//! condition and category time window, deduplicated by id (first occurrence
//! wins), accumulated in sample order, then split evenly across the trip's
//! days together with the weather slots.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::models::{Attraction, WeatherCondition, WeatherSample};
use crate::{PlannerError, Result};

use super::{DayPlan, SuggestionSlot};

/// Waterfall visits are limited to local hours [10, 16], both inclusive
const WATERFALL_OPEN_HOUR: u32 = 10;
const WATERFALL_CLOSE_HOUR: u32 = 16;

/// Insertion-ordered id set: makes "first occurrence wins" an explicit,
/// testable rule instead of a side effect of iteration order.
#[derive(Debug, Default)]
pub struct OrderedIdSet {
    order: Vec<i32>,
    seen: HashSet<i32>,
}

impl OrderedIdSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id; returns false when it was already present
    pub fn insert(&mut self, id: i32) -> bool {
        if self.seen.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn contains(&self, id: i32) -> bool {
        self.seen.contains(&id)
    }

    /// Ids in insertion order
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Whether an attraction suits the sample entirely: condition and hour
fn suits_sample(attraction: &Attraction, sample: &WeatherSample) -> bool {
    suits_condition(attraction, &sample.condition) && suits_hour(attraction, sample.local_hour())
}

/// Whether an attraction suits the sample's weather condition.
///
/// Clouds and rain narrow the field to attractions whose ideal-weather text
/// mentions them; any other condition keeps everything.
fn suits_condition(attraction: &Attraction, condition: &WeatherCondition) -> bool {
    match condition {
        WeatherCondition::Clouds => attraction.ideal_weather_mentions("cloud"),
        WeatherCondition::Rain => attraction.ideal_weather_mentions("rain"),
        _ => true,
    }
}

/// Whether an attraction may be visited at the sample's local hour
fn suits_hour(attraction: &Attraction, local_hour: u32) -> bool {
    if attraction.is_waterfall() {
        (WATERFALL_OPEN_HOUR..=WATERFALL_CLOSE_HOUR).contains(&local_hour)
    } else {
        true
    }
}

/// Collect the deduplicated candidate list across all weather samples,
/// in weather-sample order then attraction-list order.
fn collect_candidates(weather: &[WeatherSample], attractions: &[Attraction]) -> Vec<Attraction> {
    let mut visited = OrderedIdSet::new();
    let mut candidates = Vec::new();

    for sample in weather {
        for attraction in attractions {
            if suits_sample(attraction, sample) && visited.insert(attraction.id) {
                candidates.push(attraction.clone());
            }
        }
    }

    candidates
}

/// Evenly slice `items` for day `day` out of `days` using ceiling division
fn day_slice<T>(items: &[T], day: usize, days: usize) -> &[T] {
    let per_day = items.len().div_ceil(days);
    let start = (day * per_day).min(items.len());
    let end = ((day + 1) * per_day).min(items.len());
    &items[start..end]
}

/// Build the per-day itinerary from weather samples and candidate attractions.
///
/// Returns exactly `days` plans. Days beyond the available candidates or
/// weather slots come back empty rather than being dropped.
#[instrument(skip(weather, attractions), fields(samples = weather.len(), attractions = attractions.len()))]
pub fn build_itinerary(
    weather: &[WeatherSample],
    attractions: &[Attraction],
    days: u32,
) -> Result<Vec<DayPlan>> {
    if days == 0 {
        return Err(PlannerError::validation("days must be a positive number"));
    }
    let days = days as usize;

    let candidates = collect_candidates(weather, attractions);
    debug!("{} candidate attractions after filtering", candidates.len());

    let mut plans = Vec::with_capacity(days);
    for day in 0..days {
        let daily_attractions = day_slice(&candidates, day, days);
        let daily_weather = day_slice(weather, day, days);

        // The day's subset is replicated into every slot, minus attractions
        // unsuited for that particular slot's condition or hour.
        let suggestions = daily_weather
            .iter()
            .map(|sample| {
                SuggestionSlot::from_sample(
                    sample,
                    daily_attractions
                        .iter()
                        .filter(|attraction| suits_sample(attraction, sample)),
                )
            })
            .collect();

        plans.push(DayPlan {
            day: (day + 1) as u32,
            suggestions,
        });
    }

    Ok(plans)
}
