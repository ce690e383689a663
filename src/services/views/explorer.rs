// src/services/views/explorer.rs
use serde::Serialize;

use crate::models::Cell;
use crate::services::formatter::with_commas;
use crate::services::store::DataStore;

/// Explorer headers use the spelling from the source file.
const DISPLAY_NAMES: &[(&str, &str)] = &[("Shareholders_Equity", "Shareholder's Equity")];

#[derive(Debug, Serialize)]
pub struct ExplorerView {
    pub title: &'static str,
    pub notice: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn display_cell(cell: &Cell) -> String {
    match cell {
        Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        Cell::Number(n) => with_commas(*n, 2),
        Cell::Text(t) => t.clone(),
        Cell::Missing => String::new(),
    }
}

pub fn explorer(store: &DataStore) -> ExplorerView {
    let table = &store.financials;
    if table.is_empty() {
        return ExplorerView {
            title: "Financial Data Explorer",
            notice: Some("No financial data available".to_string()),
            columns: Vec::new(),
            rows: Vec::new(),
        };
    }

    let display = table.clone().renamed(DISPLAY_NAMES);
    ExplorerView {
        title: "Financial Data Explorer",
        notice: None,
        columns: display.columns().to_vec(),
        rows: display
            .rows()
            .iter()
            .map(|row| row.iter().map(display_cell).collect())
            .collect(),
    }
}
