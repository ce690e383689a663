// src/services/loader.rs
//! CSV loading for the dashboard datasets.

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Cell, Table};

pub const FINANCIAL_RENAMES: &[(&str, &str)] = &[("Shareholder's Equity", "Shareholders_Equity")];

pub const COMMODITY_RENAMES: &[(&str, &str)] = &[
    ("CPIAUCSL", "CPI"),
    ("WTISPLC", "Oil"),
    ("PCOPPUSDM", "Copper"),
    ("GDP", "GDP"),
];

/// Accepted names for the sentiment score column, highest priority first.
pub const SENTIMENT_SCORE_ALIASES: &[&str] =
    &["sentiment_score", "sentiment", "score", "sentiment score"];

const MISSING_TOKENS: &[&str] = &["", "NaN", "nan", "NA", "N/A", "null", "None"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found at: {}", .0.display())]
    NotFound(PathBuf),
    #[error("data file could not be read ({}): {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnResolution {
    Found(String),
    Missing { available: Vec<String> },
}

/// Parse dates: ISO, ISO with time, US and EU slashes, "Feb 20, 2024"
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

fn parse_cell(raw: &str) -> Cell {
    let s = raw.trim();
    if MISSING_TOKENS.contains(&s) {
        return Cell::Missing;
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        Ok(_) => Cell::Missing,
        Err(_) => Cell::Text(s.to_string()),
    }
}

fn parse_date_cell(raw: &str, column: &str) -> Cell {
    let s = raw.trim();
    if MISSING_TOKENS.contains(&s) {
        return Cell::Missing;
    }
    match parse_date(s) {
        Some(d) => Cell::Date(d),
        None => {
            debug!("Unparseable date {:?} in column {}", s, column);
            Cell::Missing
        }
    }
}

/// Reads a CSV with a header row into a `Table`.
///
/// Header names are trimmed, the columns in `date_columns` that exist are parsed
/// as dates, and `renames` is applied last.
pub fn load(path: &Path, date_columns: &[&str], renames: &[(&str, &str)]) -> Result<Table, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let is_date: Vec<bool> = columns
        .iter()
        .map(|c| date_columns.contains(&c.as_str()))
        .collect();

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Row {} in {:?}: {}", i + 1, path, e);
                continue;
            }
        };
        let row = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let raw = record.get(idx).unwrap_or("");
                if is_date[idx] {
                    parse_date_cell(raw, name)
                } else {
                    parse_cell(raw)
                }
            })
            .collect();
        rows.push(row);
    }

    let table = Table::new(columns, rows).renamed(renames);
    info!("{:?}: {} rows, {} columns loaded", path, table.len(), table.columns().len());
    Ok(table)
}

/// Like [`load`], but a failure degrades to an empty table plus the warning text
/// to show the user.
pub fn load_or_empty(
    path: &Path,
    date_columns: &[&str],
    renames: &[(&str, &str)],
) -> (Table, Option<String>) {
    match load(path, date_columns, renames) {
        Ok(table) => (table, None),
        Err(e) => {
            warn!("{}", e);
            (Table::empty(), Some(e.to_string()))
        }
    }
}

/// First candidate present in the table wins.
pub fn resolve_column(table: &Table, candidates: &[&str]) -> ColumnResolution {
    candidates
        .iter()
        .find(|c| table.has_column(c))
        .map(|c| ColumnResolution::Found((*c).to_string()))
        .unwrap_or_else(|| ColumnResolution::Missing {
            available: table.columns().to_vec(),
        })
}
