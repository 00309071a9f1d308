//! Nearest-restaurant enrichment
//!
//! Runs after the matching engine: every suggested attraction gets the
//! single nearest restaurant with a rating of at least 3. Lookups within a
//! slot fan out concurrently; slots and days proceed in order. Any lookup
//! failure aborts the request, matching the no-partial-results policy.

use futures::future::try_join_all;
use tracing::{debug, instrument};

use crate::Result;
use crate::models::{Restaurant, distance_km};
use crate::places::RestaurantSource;

use super::{AttractionSuggestion, DayPlan};

/// Minimum acceptable restaurant rating
const MIN_RATING: f64 = 3.0;
/// How many restaurants to keep per attraction
const NEARBY_LIMIT: usize = 1;

/// Attach nearby restaurants to every suggestion in the plans
#[instrument(skip(plans, source))]
pub async fn attach_restaurants(plans: &mut [DayPlan], source: &dyn RestaurantSource) -> Result<()> {
    for plan in plans.iter_mut() {
        for slot in plan.suggestions.iter_mut() {
            let lookups = slot
                .attractions
                .iter()
                .map(|suggestion| enrich_one(suggestion, source));

            let enriched = try_join_all(lookups).await?;
            for (suggestion, restaurants) in slot.attractions.iter_mut().zip(enriched) {
                suggestion.restaurant = restaurants;
            }
        }
        debug!("day {} enriched", plan.day);
    }
    Ok(())
}

async fn enrich_one(
    suggestion: &AttractionSuggestion,
    source: &dyn RestaurantSource,
) -> Result<Vec<Restaurant>> {
    let attraction = &suggestion.attraction;
    let found = source
        .nearby_restaurants(attraction.latitude, attraction.longitude)
        .await?;

    Ok(nearest_rated(found, attraction.latitude, attraction.longitude))
}

/// Filter to acceptable ratings, sort by distance from the attraction and
/// keep the closest few
fn nearest_rated(restaurants: Vec<Restaurant>, latitude: f64, longitude: f64) -> Vec<Restaurant> {
    let mut rated: Vec<Restaurant> = restaurants
        .into_iter()
        .filter(|r| r.rating >= MIN_RATING)
        .map(|mut r| {
            r.distance_km = Some(distance_km(latitude, longitude, r.latitude, r.longitude));
            r
        })
        .collect();

    rated.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rated.truncate(NEARBY_LIMIT);
    rated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlannerError;
    use crate::models::{Attraction, WeatherCondition, WeatherSample};
    use crate::suggestions::build_itinerary;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct FixedRestaurants(Vec<Restaurant>);

    #[async_trait]
    impl RestaurantSource for FixedRestaurants {
        async fn nearby_restaurants(&self, _lat: f64, _lon: f64) -> Result<Vec<Restaurant>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RestaurantSource for FailingSource {
        async fn nearby_restaurants(&self, _lat: f64, _lon: f64) -> Result<Vec<Restaurant>> {
            Err(PlannerError::api("places upstream unavailable"))
        }
    }

    fn restaurant(name: &str, rating: f64, latitude: f64, longitude: f64) -> Restaurant {
        Restaurant {
            name: name.to_string(),
            address: None,
            rating,
            latitude,
            longitude,
            distance_km: None,
        }
    }

    fn one_day_plan() -> Vec<DayPlan> {
        let weather = vec![WeatherSample {
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            condition: WeatherCondition::Clear,
            description: "clear sky".to_string(),
            temp: 24.0,
            feels_like: 25.0,
            temp_min: 19.0,
            temp_max: 28.0,
        }];
        let attractions = vec![Attraction {
            id: 1,
            name: "Echo Point".to_string(),
            description: None,
            category: "viewpoint".to_string(),
            latitude: 10.0,
            longitude: 77.0,
            destination_id: None,
            best_climate: None,
            ideal_temp_min: None,
            ideal_temp_max: None,
            ideal_weather: "Clear".to_string(),
        }];
        build_itinerary(&weather, &attractions, 1).unwrap()
    }

    #[test]
    fn test_low_ratings_are_dropped() {
        let kept = nearest_rated(
            vec![
                restaurant("good", 4.5, 10.01, 77.0),
                restaurant("bad", 2.4, 10.0, 77.0),
            ],
            10.0,
            77.0,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "good");
    }

    #[test]
    fn test_nearest_wins() {
        let kept = nearest_rated(
            vec![
                restaurant("far", 4.8, 10.5, 77.5),
                restaurant("near", 3.1, 10.001, 77.001),
            ],
            10.0,
            77.0,
        );
        assert_eq!(kept.len(), NEARBY_LIMIT);
        assert_eq!(kept[0].name, "near");
        assert!(kept[0].distance_km.unwrap() < 1.0);
    }

    #[test]
    fn test_boundary_rating_is_kept() {
        let kept = nearest_rated(vec![restaurant("ok", 3.0, 10.0, 77.0)], 10.0, 77.0);
        assert_eq!(kept.len(), 1);
    }

    #[tokio::test]
    async fn test_attach_fills_restaurants() {
        let mut plans = one_day_plan();
        let source = FixedRestaurants(vec![
            restaurant("near", 4.0, 10.001, 77.001),
            restaurant("far", 4.0, 11.0, 78.0),
        ]);

        attach_restaurants(&mut plans, &source).await.unwrap();

        let suggestion = &plans[0].suggestions[0].attractions[0];
        assert_eq!(suggestion.restaurant.len(), 1);
        assert_eq!(suggestion.restaurant[0].name, "near");
    }

    #[tokio::test]
    async fn test_upstream_failure_aborts() {
        let mut plans = one_day_plan();
        let result = attach_restaurants(&mut plans, &FailingSource).await;
        assert!(result.is_err());
    }
}
