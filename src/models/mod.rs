//! Data models for the TripPlanner application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and metadata
//! - Attraction: Stored destinations, attractions and on-demand restaurants
//! - Weather: Forecast samples and condition labels
//! - User: Accounts and profiles

pub mod attraction;
pub mod location;
pub mod user;
pub mod weather;

// Re-export all public types for convenient access
pub use attraction::{Attraction, Destination, Restaurant};
pub use location::{Location, distance_km};
pub use user::{NewUser, ProfileUpdate, User, UserProfile};
pub use weather::{WeatherCondition, WeatherSample};
