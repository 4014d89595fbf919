use anyhow::{Context, Result, bail};
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::DEFAULT_PAGE_SIZE;

pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_CHECKPOINT_SECS: u64 = 60;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Snapshot directory; `None` keeps the catalog purely in memory
    pub data_dir: Option<PathBuf>,
    /// Periodic checkpoint interval; zero disables periodic checkpoints
    pub checkpoint_secs: u64,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: None,
            checkpoint_secs: DEFAULT_CHECKPOINT_SECS,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Load from `CATALOG_*` environment variables, reading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let host = lookup("CATALOG_HOST").unwrap_or(defaults.host);

        let port = match lookup("CATALOG_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("CATALOG_PORT must be a valid u16")?,
            None => defaults.port,
        };

        let data_dir = lookup("CATALOG_DATA_DIR")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        let checkpoint_secs = match lookup("CATALOG_CHECKPOINT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("CATALOG_CHECKPOINT_SECS must be a valid u64")?,
            None => defaults.checkpoint_secs,
        };

        let default_page_size = match lookup("CATALOG_DEFAULT_PAGE_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .context("CATALOG_DEFAULT_PAGE_SIZE must be a valid usize")?,
            None => defaults.default_page_size,
        };

        let max_page_size = match lookup("CATALOG_MAX_PAGE_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .context("CATALOG_MAX_PAGE_SIZE must be a valid usize")?,
            None => defaults.max_page_size,
        };

        let config = Self {
            host,
            port,
            data_dir,
            checkpoint_secs,
            default_page_size,
            max_page_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            bail!("max page size must be at least 1");
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            bail!(
                "default page size must be between 1 and {}",
                self.max_page_size
            );
        }
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn checkpoint_interval(&self) -> Option<Duration> {
        match self.checkpoint_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Command-line flags; each one overrides its environment variable.
#[derive(Debug, Default, Parser)]
#[command(name = "catalogdb", version, about = "Catalog store HTTP server")]
pub struct Cli {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Directory for catalog snapshots
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Seconds between periodic snapshots (0 disables)
    #[arg(long)]
    pub checkpoint_secs: Option<u64>,
}

impl Cli {
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(data_dir) = self.data_dir {
            config.data_dir = Some(data_dir);
        }
        if let Some(checkpoint_secs) = self.checkpoint_secs {
            config.checkpoint_secs = checkpoint_secs;
        }
        config
    }
}
