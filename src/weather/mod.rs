//! Weather forecasting
//!
//! Wraps the OpenWeatherMap 5-day/3-hour forecast API and restricts samples
//! to the daylight window of a single requested date. Multi-day coverage is
//! the caller's loop, one date per call.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::WeatherSample;

pub mod open_weather;

pub use open_weather::ForecastClient;

/// Start of the daylight window, inclusive
pub const DAYLIGHT_START_HOUR: u32 = 6;
/// End of the daylight window, exclusive
pub const DAYLIGHT_END_HOUR: u32 = 18;

/// Keep only samples inside the date's daylight window [06:00, 18:00)
#[must_use]
pub fn daylight_window(samples: Vec<WeatherSample>, date: NaiveDate) -> Vec<WeatherSample> {
    let start: NaiveDateTime = date
        .and_hms_opt(DAYLIGHT_START_HOUR, 0, 0)
        .expect("valid window start");
    let end: NaiveDateTime = date
        .and_hms_opt(DAYLIGHT_END_HOUR, 0, 0)
        .expect("valid window end");

    samples
        .into_iter()
        .filter(|sample| sample.timestamp >= start && sample.timestamp < end)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherCondition;
    use rstest::rstest;

    fn sample_at(date: NaiveDate, hour: u32) -> WeatherSample {
        WeatherSample {
            timestamp: date.and_hms_opt(hour, 0, 0).unwrap(),
            condition: WeatherCondition::Clear,
            description: "clear sky".to_string(),
            temp: 22.0,
            feels_like: 22.5,
            temp_min: 18.0,
            temp_max: 26.0,
        }
    }

    #[rstest]
    #[case(5, false)] // before the window
    #[case(6, true)] // window start is inclusive
    #[case(12, true)]
    #[case(15, true)]
    #[case(18, false)] // window end is exclusive
    #[case(21, false)]
    fn test_window_boundaries(#[case] hour: u32, #[case] kept: bool) {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let filtered = daylight_window(vec![sample_at(date, hour)], date);
        assert_eq!(!filtered.is_empty(), kept, "hour {hour}");
    }

    #[test]
    fn test_other_dates_are_excluded() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let next_day = date.succ_opt().unwrap();
        let samples = vec![sample_at(date, 9), sample_at(next_day, 9)];

        let filtered = daylight_window(samples, date);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date(), date);
    }

    #[test]
    fn test_order_is_preserved() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let samples = vec![
            sample_at(date, 6),
            sample_at(date, 9),
            sample_at(date, 12),
            sample_at(date, 15),
        ];

        let filtered = daylight_window(samples, date);
        let hours: Vec<u32> = filtered.iter().map(WeatherSample::local_hour).collect();
        assert_eq!(hours, vec![6, 9, 12, 15]);
    }
}
