use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tripplanner::{AppState, PlannerConfig, db, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = PlannerConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting tripplanner {}", tripplanner::VERSION);

    let pool = db::connect(&config.database).await?;
    db::ensure_schema(&pool).await?;

    let refresh_coordinates = config.database.refresh_coordinates_on_start;
    let port = config.server.port;

    let state = AppState::new(config, pool)?;

    if refresh_coordinates {
        let updated = state
            .attractions
            .refresh_coordinates(state.geocoder.as_ref())
            .await?;
        tracing::info!("Refreshed coordinates of {updated} attraction(s)");
    }

    web::run(state, port).await?;
    Ok(())
}
