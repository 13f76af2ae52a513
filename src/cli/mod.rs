use crate::data::configuration::Configuration;
use crate::data::dbconnector::{DBConnection, SQLConnector};
use crate::server;
use anyhow::Context;
use clap::Parser;
use log::{debug, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Initialize the database and exit without serving.
    #[arg(long)]
    pub init_only: bool,
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,
    #[arg(short, long, default_value_t = String::from("configuration.toml"))]
    pub configuration_path: String,
}

pub async fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    debug!("Configuration path: {}", args.configuration_path);
    let config = Configuration::load(&args.configuration_path)?;
    debug!("Loaded configuration: {config:?}");
    // Check the database connection
    let mut db_connector = SQLConnector::new(&config.database.url());
    db_connector.connect().await?;
    db_connector.check().await?;
    // Has database been initialised ?
    if db_connector.is_initialized().await? {
        info!("Database is initialized");
    } else {
        info!("Database is not initialized, performing initialization");
        db_connector.initialize(&config).await?;
    }

    if args.init_only {
        return db_connector.close().await;
    }

    let database_connection = db_connector.connection()?.clone();
    let served = server::run(database_connection, args.port).await;
    db_connector
        .close()
        .await
        .context("failed to close database")?;
    served
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["eventboard"]);
        assert_eq!(args.port, 8080);
        assert_eq!(args.configuration_path, "configuration.toml");
        assert!(!args.init_only);
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "eventboard",
            "--init-only",
            "-p",
            "9000",
            "-c",
            "conf/eventboard.toml",
        ]);
        assert!(args.init_only);
        assert_eq!(args.port, 9000);
        assert_eq!(args.configuration_path, "conf/eventboard.toml");
    }
}
