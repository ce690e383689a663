// src/config.rs
use anyhow::{Context, Result};
use log::{info, warn};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3030;
pub const FINANCIALS_FILE: &str = "financials_cleaned_for_plots.csv";
pub const COMMODITIES_FILE: &str = "commodities.csv";
pub const SENTIMENT_FILE: &str = "senti.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub financials_file: String,
    pub commodities_file: String,
    pub sentiment_file: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("."),
            financials_file: FINANCIALS_FILE.to_string(),
            commodities_file: COMMODITIES_FILE.to_string(),
            sentiment_file: SENTIMENT_FILE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Reads `.env` (if any), then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DashboardConfig::default();

        let port = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number, got {:?}", p))?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let config = DashboardConfig {
            port,
            data_dir: lookup("DASHBOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            financials_file: lookup("FINANCIALS_CSV").unwrap_or(defaults.financials_file),
            commodities_file: lookup("COMMODITIES_CSV").unwrap_or(defaults.commodities_file),
            sentiment_file: lookup("SENTIMENT_CSV").unwrap_or(defaults.sentiment_file),
        };
        info!("Using data directory: {:?}", config.data_dir);
        Ok(config)
    }

    pub fn financials_path(&self) -> PathBuf {
        self.data_dir.join(&self.financials_file)
    }

    pub fn commodities_path(&self) -> PathBuf {
        self.data_dir.join(&self.commodities_file)
    }

    pub fn sentiment_path(&self) -> PathBuf {
        self.data_dir.join(&self.sentiment_file)
    }
}
