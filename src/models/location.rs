//! Location model for geographic coordinates and metadata

use haversine::{Location as HaversineLocation, Units};
use serde::{Deserialize, Serialize};

/// A resolved geographic point
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Resolved place name
    pub name: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two points in kilometers
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine::distance(
        HaversineLocation {
            latitude: lat1,
            longitude: lon1,
        },
        HaversineLocation {
            latitude: lat2,
            longitude: lon2,
        },
        Units::Kilometers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_km(10.0, 76.0, 10.0, 76.0), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let there = distance_km(10.0889, 77.0595, 9.9312, 76.2673);
        let back = distance_km(9.9312, 76.2673, 10.0889, 77.0595);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_longitude_at_equator() {
        // One degree of longitude on the equator is about 111 km
        let distance = distance_km(0.0, 0.0, 0.0, 1.0);
        assert!(
            (distance - 111.0).abs() / 111.0 < 0.01,
            "expected ~111 km, got {distance}"
        );
    }

    #[test]
    fn test_format_coordinates() {
        let location = Location::new(10.0889, 77.0595, "Munnar".to_string());
        assert_eq!(location.format_coordinates(), "10.0889, 77.0595");
    }
}
