//! Weather forecast samples and condition labels

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// Normalized primary weather condition of a forecast sample.
///
/// Parsed from the forecast API's free-form condition keyword instead of
/// comparing raw strings everywhere; unrecognized labels are preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Other(String),
}

impl WeatherCondition {
    /// Parse a condition keyword (e.g. "Rain", "clouds") into a label
    #[must_use]
    pub fn parse(keyword: &str) -> Self {
        match keyword.to_lowercase().as_str() {
            "clear" => WeatherCondition::Clear,
            "clouds" => WeatherCondition::Clouds,
            "rain" => WeatherCondition::Rain,
            other => WeatherCondition::Other(other.to_string()),
        }
    }

    /// Lower-case condition label as used in API responses
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::Clouds => "clouds",
            WeatherCondition::Rain => "rain",
            WeatherCondition::Other(label) => label,
        }
    }
}

impl Serialize for WeatherCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One 3-hour forecast sample. Ephemeral, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSample {
    /// Station-local timestamp of the sample
    pub timestamp: NaiveDateTime,
    /// Normalized condition label
    pub condition: WeatherCondition,
    /// Human-readable description from the forecast source
    pub description: String,
    /// Instantaneous temperature in Celsius
    pub temp: f64,
    /// Perceived temperature in Celsius
    pub feels_like: f64,
    /// Minimum temperature in Celsius
    pub temp_min: f64,
    /// Maximum temperature in Celsius
    pub temp_max: f64,
}

impl WeatherSample {
    /// Local hour of the sample, 0-23
    #[must_use]
    pub fn local_hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Calendar date of the sample
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Timestamp formatted the way the forecast source reports it
    #[must_use]
    pub fn format_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_parsing() {
        assert_eq!(WeatherCondition::parse("Clear"), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::parse("CLOUDS"), WeatherCondition::Clouds);
        assert_eq!(WeatherCondition::parse("rain"), WeatherCondition::Rain);
        assert_eq!(
            WeatherCondition::parse("Thunderstorm"),
            WeatherCondition::Other("thunderstorm".to_string())
        );
    }

    #[test]
    fn test_condition_label_is_lowercase() {
        assert_eq!(WeatherCondition::parse("Rain").label(), "rain");
        assert_eq!(WeatherCondition::parse("Drizzle").label(), "drizzle");
    }

    #[test]
    fn test_local_hour() {
        let sample = WeatherSample {
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap(),
            condition: WeatherCondition::Clear,
            description: "clear sky".to_string(),
            temp: 24.0,
            feels_like: 25.1,
            temp_min: 19.0,
            temp_max: 27.0,
        };
        assert_eq!(sample.local_hour(), 13);
        assert_eq!(sample.format_timestamp(), "2025-03-14 13:00:00");
    }
}
