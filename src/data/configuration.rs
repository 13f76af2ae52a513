use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Deserialize, Serialize, Default, Debug)]
pub struct Configuration {
    pub database: DatabaseConfig,
    /// Rows inserted when the database is first initialized.
    #[serde(default)]
    pub events: Vec<EventSeed>,
}

impl Configuration {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg: Self =
            toml::from_str(&config).with_context(|| format!("invalid {}", path.display()))?;
        Ok(cfg)
    }
}

#[derive(Deserialize, Serialize, Default, Debug)]
pub struct DatabaseConfig {
    /// Directory holding `db.sqlite`.
    #[serde(default)]
    pub path: String,
    /// Full connection URL, overrides `path`.
    #[serde(default)]
    pub url: Option<String>,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}/db.sqlite?mode=rwc", self.path),
        }
    }
}

#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct EventSeed {
    pub name: String,
    pub location: String,
}
