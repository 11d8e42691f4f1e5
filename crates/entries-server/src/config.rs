use std::{path::PathBuf, time::Duration};

use crate::error::Result;
use anyhow::anyhow;
pub use clap::Parser;
use entries_app::state::AppConfig;

const APP_DIR: &str = "demo-entries";

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Record service for demo entries")]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "ENTRIES_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "ENTRIES_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "ENTRIES_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/entries.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "ENTRIES_DATA_DIR",
        help = "Data directory for the database, default is system default like ~/.local/share/demo-entries"
    )]
    data_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "ENTRIES_MAX_CONNECTIONS",
        default_value_t = 10,
        help = "Maximum number of database connections"
    )]
    pub max_connections: u32,

    #[arg(
        long,
        env = "ENTRIES_CORS_MAX_AGE",
        default_value = "1 day",
        help = "How long browsers may cache CORS preflight answers, human friendly format (e.g. 1d, 1h, 30m)",
        value_parser = humantime::parse_duration
    )]
    pub cors_max_age: Duration,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|p| p.join(APP_DIR))
                .ok_or_else(|| anyhow!("Cannot determine data directory, use --data-dir")),
        }
    }

    /// Explicit database URL, if not given, database file is placed in data directory
    pub fn database_url(&self) -> Result<String> {
        match &self.database_url {
            Some(url) => Ok(url.clone()),
            None => Ok(format!("sqlite://{}/entries.db", self.data_dir()?.display())),
        }
    }

    pub fn uses_data_dir(&self) -> bool {
        self.database_url.is_none()
    }
}

impl From<&ServerConfig> for AppConfig {
    fn from(config: &ServerConfig) -> Self {
        AppConfig {
            cors_max_age: config.cors_max_age,
        }
    }
}
