use anyhow::Context;
use log::{debug, info};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::time::Duration;

use crate::data::configuration::Configuration;
use crate::data::schema;
use crate::repository::{self, EventAttributes};

#[allow(async_fn_in_trait)]
pub trait DBConnection {
    async fn connect(&mut self) -> Result<(), anyhow::Error>;
    async fn check(&self) -> Result<(), anyhow::Error>;
    async fn close(&self) -> Result<(), anyhow::Error>;
    async fn is_initialized(&self) -> Result<bool, anyhow::Error>;
    async fn initialize(&self, config: &Configuration) -> Result<(), anyhow::Error>;
}

// Recycling the only connection of an in-memory pool would drop the database.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 100);

fn connect_options(url: &str) -> ConnectOptions {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging_level(log::LevelFilter::Debug);
    // Every pooled connection would otherwise open its own empty database.
    if url.contains(":memory:") {
        options
            .max_connections(1)
            .min_connections(1)
            .max_lifetime(MEMORY_CONNECTION_LIFETIME)
            .idle_timeout(MEMORY_CONNECTION_LIFETIME);
    }
    options
}

pub struct SQLConnector {
    url: String,
    database_connection: Option<DatabaseConnection>,
}

impl SQLConnector {
    pub fn new(url: &str) -> Self {
        SQLConnector {
            url: url.to_string(),
            database_connection: None,
        }
    }

    pub fn in_memory() -> Self {
        SQLConnector::new("sqlite::memory:")
    }

    pub fn connection(&self) -> anyhow::Result<&DatabaseConnection> {
        self.database_connection
            .as_ref()
            .context("database is not connected")
    }
}

impl DBConnection for SQLConnector {
    async fn connect(&mut self) -> Result<(), anyhow::Error> {
        let db = Database::connect(connect_options(&self.url))
            .await
            .with_context(|| format!("failed to connect to {}", self.url))?;
        debug!("Connected to {}", self.url);

        self.database_connection = Some(db);
        Ok(())
    }

    async fn check(&self) -> Result<(), anyhow::Error> {
        if let Some(ref db) = self.database_connection {
            db.ping().await?;
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), anyhow::Error> {
        if let Some(ref db) = self.database_connection {
            let db = db.clone();
            db.close().await?;
        }
        Ok(())
    }

    async fn is_initialized(&self) -> Result<bool, anyhow::Error> {
        let db = self.connection()?;
        let row = db
            .query_one(Statement::from_sql_and_values(
                db.get_database_backend(),
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
                ["events".into()],
            ))
            .await?;
        Ok(row.is_some())
    }

    async fn initialize(&self, config: &Configuration) -> Result<(), anyhow::Error> {
        let db = self.connection()?;
        schema::create_all(db)
            .await
            .context("failed to create schema")?;

        for seed in &config.events {
            let event = repository::events::create(
                db,
                EventAttributes {
                    name: Some(seed.name.clone()),
                    location: Some(seed.location.clone()),
                },
            )
            .await
            .with_context(|| format!("failed to seed event {}", seed.name))?;
            info!("Seeded {event}");
        }
        Ok(())
    }
}
