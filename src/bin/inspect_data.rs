// src/bin/inspect_data.rs
use financial_dashboard::config::DashboardConfig;
use financial_dashboard::models::{CommodityRecord, FinancialRecord, Table};
use financial_dashboard::services::loader::{resolve_column, ColumnResolution, SENTIMENT_SCORE_ALIASES};
use financial_dashboard::services::sentiment::{mean_score, polarity_counts};
use financial_dashboard::services::store::{DataStore, DATE_COLUMN, SENTIMENT_DATE_COLUMN};

fn describe(name: &str, table: &Table, date_column: &str) {
    println!("{}: {} rows, {} columns", name, table.len(), table.columns().len());
    println!("  columns: {}", table.columns().join(", "));
    println!("  numeric: {}", table.numeric_columns().join(", "));
    match table.date_range(date_column) {
        Some((first, last)) => println!("  dates:   {} .. {}", first, last),
        None => println!("  dates:   none"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = DashboardConfig::from_env()?;
    let store = DataStore::load(&config);

    for warning in &store.warnings {
        println!("WARNING: {}", warning);
    }

    describe("Financials", &store.financials, DATE_COLUMN);
    if let Some(latest) = FinancialRecord::from_table(&store.financials).last() {
        println!("  latest:  {:?}", latest);
    }

    describe("Commodities", &store.commodities, DATE_COLUMN);
    if let Some(latest) = CommodityRecord::from_table(&store.commodities).last() {
        println!("  latest:  {:?}", latest);
    }

    describe("Sentiment", &store.sentiment, SENTIMENT_DATE_COLUMN);
    match resolve_column(&store.sentiment, SENTIMENT_SCORE_ALIASES) {
        ColumnResolution::Found(column) => {
            let scores = store.sentiment.numbers(&column);
            println!("  score column: {} ({} scores, mean {:.3})", column, scores.len(), mean_score(&scores));
            for count in polarity_counts(&scores) {
                println!("    {:?}: {} ({:.1}%)", count.polarity, count.count, count.percent);
            }
        }
        ColumnResolution::Missing { available } => {
            println!("  score column: not found among {:?}", available);
        }
    }
    Ok(())
}
