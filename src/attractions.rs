//! Spatial attraction lookup
//!
//! Radius queries run against the PostGIS `location` point; results come
//! back ordered by latitude then longitude. The radius itself is caller
//! policy, not part of this store's contract.

use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::Result;
use crate::geocode::GeocodeClient;
use crate::models::{Attraction, Location};

const ATTRACTION_COLUMNS: &str = "id, name, description, category, latitude, longitude, \
     destination_id, best_climate, ideal_temp_min, ideal_temp_max, ideal_weather";

/// Read access to the attractions table
#[derive(Clone)]
pub struct AttractionStore {
    pool: PgPool,
}

impl AttractionStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All attractions within `radius_km` of the center, optionally
    /// restricted to one category
    #[instrument(skip(self, center), fields(center = %center.format_coordinates()))]
    pub async fn within_radius(
        &self,
        center: &Location,
        radius_km: f64,
        category: Option<&str>,
    ) -> Result<Vec<Attraction>> {
        let attractions: Vec<Attraction> = match category {
            Some(category) => {
                let sql = format!(
                    "SELECT {ATTRACTION_COLUMNS} FROM attractions \
                     WHERE ST_DWithin(location::geography, ST_MakePoint($2, $1)::geography, $3 * 1000) \
                       AND category = $4 \
                     ORDER BY latitude, longitude"
                );
                sqlx::query_as(&sql)
                    .bind(center.latitude)
                    .bind(center.longitude)
                    .bind(radius_km)
                    .bind(category)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {ATTRACTION_COLUMNS} FROM attractions \
                     WHERE ST_DWithin(location::geography, ST_MakePoint($2, $1)::geography, $3 * 1000) \
                     ORDER BY latitude, longitude"
                );
                sqlx::query_as(&sql)
                    .bind(center.latitude)
                    .bind(center.longitude)
                    .bind(radius_km)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        info!(
            "{} attractions within {radius_km} km of {}",
            attractions.len(),
            center.name
        );
        Ok(attractions)
    }

    /// Attraction rows matching a name exactly
    #[instrument(skip(self))]
    pub async fn by_name(&self, name: &str) -> Result<Vec<Attraction>> {
        let sql = format!("SELECT {ATTRACTION_COLUMNS} FROM attractions WHERE name = $1");
        let attractions = sqlx::query_as(&sql)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        Ok(attractions)
    }

    /// Re-geocode every stored attraction by name and rewrite its
    /// coordinates and spatial point. Startup maintenance; attractions the
    /// geocoder cannot resolve are left untouched.
    #[instrument(skip(self, geocoder))]
    pub async fn refresh_coordinates(&self, geocoder: &GeocodeClient) -> Result<usize> {
        let rows: Vec<(i32, String)> = sqlx::query_as("SELECT id, name FROM attractions")
            .fetch_all(&self.pool)
            .await?;

        let mut updated = 0usize;
        for (id, name) in rows {
            let Some(resolved) = geocoder.resolve(&name).await? else {
                warn!("No geocoding result for attraction '{name}', keeping stored coordinates");
                continue;
            };

            sqlx::query(
                "UPDATE attractions \
                 SET latitude = $1, longitude = $2, \
                     location = ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography \
                 WHERE id = $3",
            )
            .bind(resolved.latitude)
            .bind(resolved.longitude)
            .bind(id)
            .execute(&self.pool)
            .await?;

            info!(
                "Updated '{name}' to {:.6}, {:.6}",
                resolved.latitude, resolved.longitude
            );
            updated += 1;
        }

        Ok(updated)
    }
}
