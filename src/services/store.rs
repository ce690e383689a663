// src/services/store.rs
use log::info;

use crate::config::DashboardConfig;
use crate::models::Table;
use super::loader::{load_or_empty, COMMODITY_RENAMES, FINANCIAL_RENAMES};

pub const DATE_COLUMN: &str = "Date";
pub const SENTIMENT_DATE_COLUMN: &str = "date";

/// The three datasets, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    pub financials: Table,
    pub commodities: Table,
    pub sentiment: Table,
    /// Load problems to surface to the user, one per failed dataset.
    pub warnings: Vec<String>,
}

impl DataStore {
    pub fn load(config: &DashboardConfig) -> Self {
        let mut warnings = Vec::new();

        let (financials, warning) =
            load_or_empty(&config.financials_path(), &[DATE_COLUMN], FINANCIAL_RENAMES);
        warnings.extend(warning.map(|w| format!("Financial {}", w)));

        let (commodities, warning) =
            load_or_empty(&config.commodities_path(), &[DATE_COLUMN], COMMODITY_RENAMES);
        warnings.extend(warning.map(|w| format!("Commodities {}", w)));

        let (sentiment, warning) =
            load_or_empty(&config.sentiment_path(), &[SENTIMENT_DATE_COLUMN], &[]);
        warnings.extend(warning.map(|w| format!("Sentiment {}", w)));

        info!(
            "Data store ready: {} financial, {} commodity, {} sentiment rows ({} warnings)",
            financials.len(),
            commodities.len(),
            sentiment.len(),
            warnings.len()
        );

        DataStore {
            financials,
            commodities,
            sentiment,
            warnings,
        }
    }

    pub fn from_tables(financials: Table, commodities: Table, sentiment: Table) -> Self {
        DataStore {
            financials,
            commodities,
            sentiment,
            warnings: Vec::new(),
        }
    }
}
