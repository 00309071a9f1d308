//! Database pool setup and schema bootstrap

use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::Result;
use crate::config::DatabaseConfig;

const SCHEMA: &str = r#"
CREATE EXTENSION IF NOT EXISTS postgis;

CREATE TABLE IF NOT EXISTS destinations (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    latitude DOUBLE PRECISION NOT NULL,
    longitude DOUBLE PRECISION NOT NULL,
    best_climate VARCHAR(255),
    ideal_temp_min DOUBLE PRECISION,
    ideal_temp_max DOUBLE PRECISION,
    ideal_weather TEXT
);

CREATE TABLE IF NOT EXISTS attractions (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    category VARCHAR(100) NOT NULL DEFAULT '',
    latitude DOUBLE PRECISION NOT NULL,
    longitude DOUBLE PRECISION NOT NULL,
    destination_id INT REFERENCES destinations(id),
    best_climate VARCHAR(255),
    ideal_temp_min DOUBLE PRECISION,
    ideal_temp_max DOUBLE PRECISION,
    ideal_weather TEXT NOT NULL DEFAULT '',
    location GEOGRAPHY(Point, 4326)
);

CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    full_name VARCHAR(255),
    bio TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;

/// Open the connection pool
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .with_context(|| "Failed to connect to the database")?;

    info!("Connected to the database");
    Ok(pool)
}

/// Create the schema when it does not exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .with_context(|| "Failed to create database schema")?;

    info!("Database schema is in place");
    Ok(())
}
