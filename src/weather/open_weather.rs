//! OpenWeatherMap forecast client
//!
//! The upstream payload is parsed into explicit structs at this boundary;
//! a sample without a condition entry is a shape error, not a silent skip.

use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::config::WeatherConfig;
use crate::models::{WeatherCondition, WeatherSample};
use crate::{PlannerError, Result};

use super::daylight_window;

/// HTTP client for the OpenWeatherMap 5-day/3-hour forecast endpoint
pub struct ForecastClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Forecast response, 3-hour interval entries
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    main: MainReadings,
    weather: Vec<ConditionEntry>,
    dt_txt: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: String,
    description: String,
}

impl ForecastClient {
    /// Create a new forecast client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
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

    /// Fetch the forecast samples for one date, restricted to the
    /// daylight window [06:00, 18:00)
    #[instrument(skip(self))]
    pub async fn daylight_forecast(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherSample>> {
        let url = format!(
            "{}/forecast?lat={latitude}&lon={longitude}&appid={}&units=metric",
            self.base_url, self.api_key
        );

        debug!("Fetching forecast for {date} at {latitude:.4}, {longitude:.4}");

        let response: ForecastResponse = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| "Failed to parse forecast response")?;

        let samples = parse_samples(response)?;
        let filtered = daylight_window(samples, date);

        if filtered.is_empty() {
            info!("No forecast samples within the daylight window of {date}");
        } else {
            info!("{} forecast samples for {date}", filtered.len());
        }

        Ok(filtered)
    }
}

fn parse_samples(response: ForecastResponse) -> Result<Vec<WeatherSample>> {
    response.list.into_iter().map(parse_entry).collect()
}

fn parse_entry(entry: ForecastEntry) -> Result<WeatherSample> {
    let timestamp = chrono::NaiveDateTime::parse_from_str(&entry.dt_txt, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| PlannerError::api(format!("Invalid forecast timestamp '{}': {e}", entry.dt_txt)))?;

    let condition = entry
        .weather
        .first()
        .ok_or_else(|| PlannerError::api(format!("Forecast entry at {} has no condition", entry.dt_txt)))?;

    Ok(WeatherSample {
        timestamp,
        condition: WeatherCondition::parse(&condition.main),
        description: condition.description.clone(),
        temp: entry.main.temp,
        feels_like: entry.main.feels_like,
        temp_min: entry.main.temp_min,
        temp_max: entry.main.temp_max,
    })
}
