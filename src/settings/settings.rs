use anyhow::{Result, anyhow};
use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub storage: Storage,
    pub log: Log,
    #[serde(default)]
    pub ranking: Ranking,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
    pub backend: String, // "memory" or "mysql"
    #[serde(default)]
    pub dsn: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Ranking {
    pub default_count: u32,
}

impl Default for Ranking {
    fn default() -> Self {
        Ranking {
            default_count: crate::domain_model::DEFAULT_TOP_COUNT,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

impl Storage {
    /// `DATABASE_URL` wins over the file.
    pub fn resolved_dsn(&self) -> Option<String> {
        std::env::var("DATABASE_URL").ok().or_else(|| self.dsn.clone())
    }
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}
