//! HTTP API handlers
//!
//! Thin orchestration: validate query parameters, call the services in
//! sequence, map errors to status codes. Trip planning flows through
//! geocode -> radius lookup -> weather -> suggestion engine -> enrichment.

use axum::Router;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use chrono::{Days, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::{Attraction, WeatherSample};
use crate::state::AppState;
use crate::suggestions::{self, DayPlan};
use crate::{PlannerError, Result};

pub mod users;

/// Trip length at which the search radius widens, in days
const LONG_TRIP_DAYS: u32 = 2;
/// Search radius for trips of `LONG_TRIP_DAYS` or more
const LONG_TRIP_RADIUS_KM: f64 = 20.0;
/// Search radius for shorter trips
const SHORT_TRIP_RADIUS_KM: f64 = 5.0;

/// All application routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/attraction/getAttraction", get(get_attraction))
        .route(
            "/attraction/getAttractionDetails",
            get(get_attraction_details),
        )
        .route("/weather/getWeather", get(get_weather))
        .merge(users::router())
}

async fn ping() -> &'static str {
    "pong"
}

#[derive(Debug, Deserialize)]
struct AttractionQuery {
    destination: Option<String>,
    days: Option<String>,
    cat: Option<String>,
    date: Option<String>,
}

async fn get_attraction(
    State(state): State<AppState>,
    Query(params): Query<AttractionQuery>,
) -> Result<Json<Vec<DayPlan>>> {
    let destination = params.destination.as_deref().unwrap_or("").trim();
    let days_raw = params.days.as_deref().unwrap_or("").trim();
    if destination.is_empty() || days_raw.is_empty() {
        return Err(PlannerError::validation("Destination and Days are required"));
    }

    let days: u32 = days_raw
        .parse()
        .ok()
        .filter(|&d| d > 0)
        .ok_or_else(|| PlannerError::validation("Days must be a positive number"))?;

    let start_date = parse_date_param(params.date.as_deref())?;

    let location = state
        .geocoder
        .resolve(destination)
        .await?
        .ok_or_else(|| PlannerError::not_found("No results found"))?;

    // Longer trips search a wider area
    let radius_km = if days >= LONG_TRIP_DAYS {
        LONG_TRIP_RADIUS_KM
    } else {
        SHORT_TRIP_RADIUS_KM
    };

    let attractions: Vec<Attraction> = state
        .attractions
        .within_radius(&location, radius_km, params.cat.as_deref())
        .await?;

    // One daylight window per trip day, in order
    let mut weather: Vec<WeatherSample> = Vec::new();
    for offset in 0..days {
        let date = start_date
            .checked_add_days(Days::new(u64::from(offset)))
            .ok_or_else(|| PlannerError::validation("Date is out of range"))?;
        let mut daily = state
            .forecast
            .daylight_forecast(date, location.latitude, location.longitude)
            .await?;
        weather.append(&mut daily);
    }

    let mut plans = suggestions::build_itinerary(&weather, &attractions, days)?;
    suggestions::attach_restaurants(&mut plans, state.restaurants.as_ref()).await?;

    info!(
        "Planned {days} day(s) in {} with {} attraction(s)",
        location.name,
        attractions.len()
    );
    Ok(Json(plans))
}

#[derive(Debug, Deserialize)]
struct AttractionDetailsQuery {
    destination: Option<String>,
}

async fn get_attraction_details(
    State(state): State<AppState>,
    Query(params): Query<AttractionDetailsQuery>,
) -> Result<Json<Vec<Attraction>>> {
    let name = params.destination.as_deref().unwrap_or("").trim();
    if name.is_empty() {
        return Err(PlannerError::validation("Destination is required"));
    }

    let attractions = state.attractions.by_name(name).await?;
    if attractions.is_empty() {
        return Err(PlannerError::not_found(format!(
            "No attraction named '{name}'"
        )));
    }

    debug!("{} attraction row(s) named '{name}'", attractions.len());
    Ok(Json(attractions))
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    date: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<Vec<WeatherSample>>> {
    let (Some(date_raw), Some(lat), Some(lng)) = (params.date.as_deref(), params.lat, params.lng)
    else {
        return Err(PlannerError::validation(
            "Date,latitude,and longitude are required",
        ));
    };

    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
        .map_err(|e| PlannerError::validation(format!("Invalid date '{date_raw}': {e}")))?;

    let samples = state.forecast.daylight_forecast(date, lat, lng).await?;
    Ok(Json(samples))
}

fn parse_date_param(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(raw) if !raw.trim().is_empty() => {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|e| PlannerError::validation(format!("Invalid date '{raw}': {e}")))
        }
        _ => Ok(Utc::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_param_defaults_to_today() {
        assert_eq!(parse_date_param(None).unwrap(), Utc::now().date_naive());
        assert_eq!(parse_date_param(Some("")).unwrap(), Utc::now().date_naive());
    }

    #[test]
    fn test_parse_date_param_accepts_iso_dates() {
        let parsed = parse_date_param(Some("2025-03-14")).unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn test_parse_date_param_rejects_garbage() {
        assert!(parse_date_param(Some("14/03/2025")).is_err());
    }
}
