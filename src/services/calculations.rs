// src/services/calculations.rs
use chrono::NaiveDate;
use serde::Serialize;
use log::warn;
use crate::models::Table;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub latest: f64,
    pub latest_date: Option<NaiveDate>,
    pub previous: f64,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub sum: f64,
}

pub fn calculate_average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Numeric values of `column` in date order, with the date of the row each came from.
pub fn values_by_date(table: &Table, date_column: &str, column: &str) -> Vec<(Option<NaiveDate>, f64)> {
    let sorted = table.sorted_by_date(date_column);
    let Some(v) = sorted.column_index(column) else {
        return Vec::new();
    };
    let d = sorted.column_index(date_column);
    sorted
        .rows()
        .iter()
        .filter_map(|row| Some((d.and_then(|d| row[d].as_date()), row[v].as_f64()?)))
        .collect()
}

impl ColumnSummary {
    /// Latest is the last numeric value in date order and previous the one before it.
    /// With a single value, previous equals latest. `latest_date` is the period the
    /// latest value belongs to, which trails the table's newest date when that row is blank.
    pub fn from_table(table: &Table, date_column: &str, column: &str) -> Option<ColumnSummary> {
        let dated = values_by_date(table, date_column, column);
        let Some(&(latest_date, latest)) = dated.last() else {
            warn!("No numeric values in column {} for summary", column);
            return None;
        };
        let previous = if dated.len() > 1 {
            dated[dated.len() - 2].1
        } else {
            latest
        };
        let values: Vec<f64> = dated.iter().map(|(_, v)| *v).collect();

        Some(ColumnSummary {
            latest,
            latest_date,
            previous,
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            mean: calculate_average(&values),
            sum: values.iter().sum(),
        })
    }
}

/// (date, value) pairs for charting, in date order. Rows missing either side are skipped.
pub fn series(table: &Table, date_column: &str, column: &str) -> Vec<(NaiveDate, f64)> {
    let sorted = table.sorted_by_date(date_column);
    let (Some(d), Some(v)) = (sorted.column_index(date_column), sorted.column_index(column)) else {
        return Vec::new();
    };
    sorted
        .rows()
        .iter()
        .filter_map(|row| Some((row[d].as_date()?, row[v].as_f64()?)))
        .collect()
}
