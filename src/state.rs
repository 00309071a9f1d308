//! Shared application state
//!
//! Every external dependency is constructed once at startup and handed to
//! the handlers through this state instead of module-level globals.

use std::sync::Arc;

use sqlx::PgPool;

use crate::attractions::AttractionStore;
use crate::config::PlannerConfig;
use crate::geocode::GeocodeClient;
use crate::places::{DisabledRestaurantSource, PlacesClient, RestaurantSource};
use crate::users::UserStore;
use crate::weather::ForecastClient;
use crate::Result;

/// Dependencies shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PlannerConfig>,
    pub attractions: AttractionStore,
    pub users: UserStore,
    pub geocoder: Arc<GeocodeClient>,
    pub forecast: Arc<ForecastClient>,
    pub restaurants: Arc<dyn RestaurantSource>,
}

impl AppState {
    /// Wire up all dependencies from configuration and an open pool
    pub fn new(config: PlannerConfig, pool: PgPool) -> Result<Self> {
        let geocoder = Arc::new(GeocodeClient::new(&config.geocoding)?);
        let forecast = Arc::new(ForecastClient::new(&config.weather)?);

        let restaurants: Arc<dyn RestaurantSource> = match &config.places.api_key {
            Some(api_key) => Arc::new(PlacesClient::new(&config.places, api_key.clone())?),
            None => {
                tracing::info!("No places API key configured, restaurant enrichment disabled");
                Arc::new(DisabledRestaurantSource)
            }
        };

        Ok(Self {
            config: Arc::new(config),
            attractions: AttractionStore::new(pool.clone()),
            users: UserStore::new(pool),
            geocoder,
            forecast,
            restaurants,
        })
    }

    /// Session signing secret
    #[must_use]
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}
