//! `TripPlanner` - Weather-aware trip planning and itinerary suggestions
//!
//! This library provides the core functionality for destination geocoding,
//! spatial attraction lookup, weather forecasting and day-by-day itinerary
//! generation, plus the user account subsystem backing the HTTP API.

pub mod api;
pub mod attractions;
pub mod config;
pub mod db;
pub mod error;
pub mod geocode;
pub mod models;
pub mod places;
pub mod session;
pub mod state;
pub mod suggestions;
pub mod users;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use geocode::GeocodeClient;
pub use models::{Attraction, Location, Restaurant, User, WeatherSample};
pub use state::AppState;
pub use suggestions::{DayPlan, SuggestionSlot, build_itinerary};
pub use weather::ForecastClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;
