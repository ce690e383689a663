// src/services/aggregate.rs
//! Month/year bucketing for the filtered view.

use chrono::{Datelike, Month};
use log::debug;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Cell, Table};

pub const SOURCE_COLUMN: &str = "source";
pub const YEAR_COLUMN: &str = "year";
pub const MONTH_COLUMN: &str = "month";

const STRUCTURAL_COLUMNS: &[&str] = &[YEAR_COLUMN, MONTH_COLUMN, SOURCE_COLUMN];

#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("column '{0}' not found")]
    UnknownColumn(String),
    #[error("column '{0}' is not a numeric metric")]
    NotAggregatable(String),
    #[error("unknown time aggregation '{0}' (expected monthly or yearly)")]
    UnknownGranularity(String),
    #[error("unknown dataset '{0}' (expected all, financial or commodities)")]
    UnknownDataset(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Monthly,
    Yearly,
}

impl Granularity {
    pub const ALL: [Granularity; 2] = [Granularity::Monthly, Granularity::Yearly];

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Monthly => "Monthly",
            Granularity::Yearly => "Yearly",
        }
    }
}

impl FromStr for Granularity {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Granularity::Monthly),
            "yearly" | "year" => Ok(Granularity::Yearly),
            _ => Err(AggregateError::UnknownGranularity(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFilter {
    #[default]
    All,
    Financial,
    Commodities,
}

impl DatasetFilter {
    pub const ALL: [DatasetFilter; 3] = [
        DatasetFilter::All,
        DatasetFilter::Financial,
        DatasetFilter::Commodities,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DatasetFilter::All => "All",
            DatasetFilter::Financial => "Financial",
            DatasetFilter::Commodities => "Commodities",
        }
    }

    /// Source tag of the rows this filter keeps; `None` keeps everything.
    pub fn source_tag(self) -> Option<&'static str> {
        match self {
            DatasetFilter::All => None,
            DatasetFilter::Financial => Some("financial"),
            DatasetFilter::Commodities => Some("commodities"),
        }
    }
}

impl FromStr for DatasetFilter {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DatasetFilter::All),
            "financial" | "financials" => Ok(DatasetFilter::Financial),
            "commodities" | "commodity" => Ok(DatasetFilter::Commodities),
            _ => Err(AggregateError::UnknownDataset(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bucket {
    Month(u32),
    Year(i32),
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Bucket::Month(m) => {
                let name = u8::try_from(*m)
                    .ok()
                    .and_then(|m| Month::try_from(m).ok())
                    .map(|m| m.name())
                    .unwrap_or("?");
                write!(f, "{}", name)
            }
            Bucket::Year(y) => write!(f, "{}", y),
        }
    }
}

/// Months serialize as their name, years as integers.
impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bucket::Month(_) => serializer.serialize_str(&self.to_string()),
            Bucket::Year(y) => serializer.serialize_i32(*y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateBucket {
    pub bucket: Bucket,
    pub value: f64,
}

/// Numeric columns a user may aggregate: everything numeric except the derived ones.
pub fn selectable_columns(table: &Table) -> Vec<String> {
    table
        .numeric_columns()
        .into_iter()
        .filter(|c| !STRUCTURAL_COLUMNS.contains(c))
        .map(str::to_string)
        .collect()
}

/// Mean of `column` per month name (January first) or per year (ascending).
///
/// Non-numeric cells and undated rows do not contribute; buckets without any
/// contributing row are left out.
pub fn aggregate(
    table: &Table,
    date_column: &str,
    column: &str,
    granularity: Granularity,
) -> Result<Vec<AggregateBucket>, AggregateError> {
    let value_idx = table
        .column_index(column)
        .ok_or_else(|| AggregateError::UnknownColumn(column.to_string()))?;
    if STRUCTURAL_COLUMNS.contains(&column) || table.numbers(column).is_empty() {
        return Err(AggregateError::NotAggregatable(column.to_string()));
    }
    let date_idx = table
        .column_index(date_column)
        .ok_or_else(|| AggregateError::UnknownColumn(date_column.to_string()))?;

    let mut sums: BTreeMap<Bucket, (f64, usize)> = BTreeMap::new();
    for row in table.rows() {
        let (Some(date), Some(value)) = (row[date_idx].as_date(), row[value_idx].as_f64()) else {
            continue;
        };
        let bucket = match granularity {
            Granularity::Monthly => Bucket::Month(date.month()),
            Granularity::Yearly => Bucket::Year(date.year()),
        };
        let entry = sums.entry(bucket).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    debug!("Aggregated {} into {} {} buckets", column, sums.len(), granularity.label());
    Ok(sums
        .into_iter()
        .map(|(bucket, (sum, count))| AggregateBucket {
            bucket,
            value: sum / count as f64,
        })
        .collect())
}

fn tagged(table: &Table, source: &str) -> Table {
    table.with_column(SOURCE_COLUMN, vec![Cell::Text(source.to_string()); table.len()])
}

/// Fresh combined table: every row carries a source tag plus derived year and month.
/// The inputs are left untouched.
pub fn combine(financial: &Table, commodities: &Table, date_column: &str) -> Table {
    let combined = Table::concat(&[&tagged(financial, "financial"), &tagged(commodities, "commodities")]);

    let dates: Vec<Option<chrono::NaiveDate>> =
        combined.column(date_column).map(Cell::as_date).collect();
    let years = dates
        .iter()
        .map(|d| d.map(|d| Cell::Number(f64::from(d.year()))).unwrap_or(Cell::Missing))
        .collect();
    let months = dates
        .iter()
        .map(|d| {
            d.map(|d| Cell::Text(Bucket::Month(d.month()).to_string()))
                .unwrap_or(Cell::Missing)
        })
        .collect();

    combined
        .with_column(YEAR_COLUMN, years)
        .with_column(MONTH_COLUMN, months)
}

pub fn filter_source(table: &Table, filter: DatasetFilter) -> Table {
    let (Some(tag), Some(idx)) = (filter.source_tag(), table.column_index(SOURCE_COLUMN)) else {
        return table.clone();
    };
    table.filter_rows(|row| matches!(&row[idx], Cell::Text(t) if t == tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(y: i32, m: u32, v: Cell) -> Vec<Cell> {
        vec![Cell::Date(NaiveDate::from_ymd_opt(y, m, 15).unwrap()), v]
    }

    fn revenue(rows: Vec<Vec<Cell>>) -> Table {
        Table::new(vec!["Date".into(), "Total Revenue".into()], rows)
    }

    #[test]
    fn test_monthly_is_calendar_ordered_across_years() {
        let t = revenue(vec![
            row(2022, 12, Cell::Number(10.0)),
            row(2021, 4, Cell::Number(1.0)),
            row(2022, 4, Cell::Number(3.0)),
            row(2021, 1, Cell::Number(5.0)),
            row(2023, 8, Cell::Number(7.0)),
        ]);
        let buckets = aggregate(&t, "Date", "Total Revenue", Granularity::Monthly).unwrap();
        let labels: Vec<String> = buckets.iter().map(|b| b.bucket.to_string()).collect();
        assert_eq!(labels, vec!["January", "April", "August", "December"]);
        assert_eq!(buckets[1].value, 2.0);
    }

    #[test]
    fn test_yearly_is_ascending_and_unique() {
        let t = revenue(vec![
            row(2023, 1, Cell::Number(4.0)),
            row(2021, 6, Cell::Number(2.0)),
            row(2023, 7, Cell::Number(6.0)),
            row(2022, 3, Cell::Number(1.0)),
        ]);
        let buckets = aggregate(&t, "Date", "Total Revenue", Granularity::Yearly).unwrap();
        assert_eq!(
            buckets.iter().map(|b| b.bucket).collect::<Vec<_>>(),
            vec![Bucket::Year(2021), Bucket::Year(2022), Bucket::Year(2023)]
        );
        assert_eq!(buckets[2].value, 5.0);
    }

    #[test]
    fn test_missing_values_are_excluded_and_empty_buckets_dropped() {
        let t = revenue(vec![
            row(2022, 1, Cell::Number(4.0)),
            row(2022, 1, Cell::Missing),
            row(2022, 2, Cell::Missing),
        ]);
        let buckets = aggregate(&t, "Date", "Total Revenue", Granularity::Monthly).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].value, 4.0);
    }

    #[test]
    fn test_rejects_structural_and_unknown_columns() {
        let t = revenue(vec![row(2022, 1, Cell::Number(4.0))]);
        let combined = combine(&t, &Table::empty(), "Date");
        assert_eq!(
            aggregate(&combined, "Date", "year", Granularity::Yearly),
            Err(AggregateError::NotAggregatable("year".into()))
        );
        assert_eq!(
            aggregate(&combined, "Date", "source", Granularity::Yearly),
            Err(AggregateError::NotAggregatable("source".into()))
        );
        assert_eq!(
            aggregate(&combined, "Date", "Nope", Granularity::Yearly),
            Err(AggregateError::UnknownColumn("Nope".into()))
        );
    }

    #[test]
    fn test_text_cells_are_left_out_of_the_mean() {
        let t = Table::new(
            vec!["Date".into(), "Oil".into()],
            vec![
                row(2022, 1, Cell::Number(4.0)),
                row(2022, 1, Cell::Text(".".into())),
                row(2022, 2, Cell::Number(6.0)),
            ],
        );
        let buckets = aggregate(&t, "Date", "Oil", Granularity::Monthly).unwrap();
        assert_eq!(
            buckets,
            vec![
                AggregateBucket { bucket: Bucket::Month(1), value: 4.0 },
                AggregateBucket { bucket: Bucket::Month(2), value: 6.0 },
            ]
        );
        assert!(selectable_columns(&t).is_empty());
    }

    #[test]
    fn test_all_text_column_is_not_aggregatable() {
        let t = Table::new(
            vec!["Date".into(), "Note".into()],
            vec![row(2022, 1, Cell::Text("n/a".into()))],
        );
        assert_eq!(
            aggregate(&t, "Date", "Note", Granularity::Yearly),
            Err(AggregateError::NotAggregatable("Note".into()))
        );
    }

    #[test]
    fn test_combine_tags_rows_without_touching_inputs() {
        let fin = revenue(vec![row(2022, 1, Cell::Number(4.0))]);
        let com = Table::new(
            vec!["Date".into(), "CPI".into()],
            vec![row(2022, 2, Cell::Number(300.0)), row(2023, 3, Cell::Number(310.0))],
        );
        let combined = combine(&fin, &com, "Date");
        assert_eq!(combined.len(), 3);
        assert!(!fin.has_column(SOURCE_COLUMN));
        assert!(!com.has_column(SOURCE_COLUMN));
        assert_eq!(
            combined.column(MONTH_COLUMN).cloned().collect::<Vec<_>>(),
            vec![
                Cell::Text("January".into()),
                Cell::Text("February".into()),
                Cell::Text("March".into())
            ]
        );
        assert_eq!(selectable_columns(&combined), vec!["Total Revenue", "CPI"]);

        let only_commodities = filter_source(&combined, DatasetFilter::Commodities);
        assert_eq!(only_commodities.len(), 2);
        assert_eq!(selectable_columns(&only_commodities), vec!["CPI"]);

        let again = combine(&fin, &com, "Date");
        assert_eq!(again, combined);
    }

    #[test]
    fn test_parse_selections() {
        assert_eq!("Yearly".parse::<Granularity>(), Ok(Granularity::Yearly));
        assert_eq!("monthly".parse::<Granularity>(), Ok(Granularity::Monthly));
        assert!("weekly".parse::<Granularity>().is_err());
        assert_eq!("Commodities".parse::<DatasetFilter>(), Ok(DatasetFilter::Commodities));
        assert!("crypto".parse::<DatasetFilter>().is_err());
    }

    #[test]
    fn test_bucket_serialization() {
        let json = serde_json::to_value(vec![
            AggregateBucket { bucket: Bucket::Month(3), value: 1.5 },
            AggregateBucket { bucket: Bucket::Year(2024), value: 2.0 },
        ])
        .unwrap();
        assert_eq!(json[0]["bucket"], "March");
        assert_eq!(json[1]["bucket"], 2024);
    }
}
