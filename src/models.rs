// src/models.rs
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// One value of a loaded table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Date(NaiveDate),
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

/// Row-major table with named columns. Every row has exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Missing);
                row
            })
            .collect();
        Table { columns, rows }
    }

    pub fn empty() -> Self {
        Table::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of one column, top to bottom. Empty when the column is absent.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Cell> + 'a {
        let idx = self.column_index(name);
        self.rows.iter().filter_map(move |row| idx.map(|i| &row[i]))
    }

    /// Finite numeric values of a column; missing and non-numeric cells are skipped.
    pub fn numbers(&self, name: &str) -> Vec<f64> {
        self.column(name).filter_map(Cell::as_f64).collect()
    }

    /// A column is numeric when it holds at least one number and no text or dates.
    pub fn is_numeric(&self, name: &str) -> bool {
        let mut seen_number = false;
        for cell in self.column(name) {
            match cell {
                Cell::Number(_) => seen_number = true,
                Cell::Missing => {}
                Cell::Text(_) | Cell::Date(_) => return false,
            }
        }
        seen_number
    }

    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| self.is_numeric(c))
            .map(String::as_str)
            .collect()
    }

    /// Applies `(from, to)` renames. Names not present are ignored.
    pub fn renamed(mut self, renames: &[(&str, &str)]) -> Self {
        for (from, to) in renames {
            if let Some(idx) = self.column_index(from) {
                self.columns[idx] = (*to).to_string();
            }
        }
        self
    }

    /// Stable sort by a date column; rows without a date come first.
    pub fn sorted_by_date(&self, date_column: &str) -> Table {
        let Some(idx) = self.column_index(date_column) else {
            return self.clone();
        };
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| match (a[idx].as_date(), b[idx].as_date()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Returns a copy with `name` set to `cells`, replacing an existing column of that name.
    pub fn with_column(&self, name: &str, cells: Vec<Cell>) -> Table {
        let mut table = self.clone();
        let idx = match table.column_index(name) {
            Some(idx) => idx,
            None => {
                table.columns.push(name.to_string());
                for row in &mut table.rows {
                    row.push(Cell::Missing);
                }
                table.columns.len() - 1
            }
        };
        for (row, cell) in table.rows.iter_mut().zip(cells) {
            row[idx] = cell;
        }
        table
    }

    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[Cell]) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Stacks tables vertically. Columns are the union in first-seen order;
    /// cells a table lacks are filled with `Cell::Missing`.
    pub fn concat(tables: &[&Table]) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for table in tables {
            for col in &table.columns {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
        }

        let mut rows = Vec::new();
        for table in tables {
            let mapping: Vec<Option<usize>> =
                columns.iter().map(|c| table.column_index(c)).collect();
            for row in &table.rows {
                rows.push(
                    mapping
                        .iter()
                        .map(|idx| idx.map(|i| row[i].clone()).unwrap_or(Cell::Missing))
                        .collect(),
                );
            }
        }

        Table { columns, rows }
    }

    pub fn date_range(&self, date_column: &str) -> Option<(NaiveDate, NaiveDate)> {
        let dates: Vec<NaiveDate> = self.column(date_column).filter_map(Cell::as_date).collect();
        let min = dates.iter().min()?;
        let max = dates.iter().max()?;
        Some((*min, *max))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRecord {
    pub date: NaiveDate,
    pub total_revenue: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub long_term_debt: Option<f64>,
    pub shareholders_equity: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub return_on_investment: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommodityRecord {
    pub date: NaiveDate,
    pub cpi: Option<f64>,
    pub oil: Option<f64>,
    pub copper: Option<f64>,
    pub gdp: Option<f64>,
}

fn number_at(table: &Table, row: &[Cell], column: &str) -> Option<f64> {
    table.column_index(column).and_then(|i| row[i].as_f64())
}

impl FinancialRecord {
    /// Typed rows of a loaded financials table, in date order. Rows without a date are dropped.
    pub fn from_table(table: &Table) -> Vec<FinancialRecord> {
        let Some(date_idx) = table.column_index("Date") else {
            return Vec::new();
        };
        let sorted = table.sorted_by_date("Date");
        sorted
            .rows()
            .iter()
            .filter_map(|row| {
                Some(FinancialRecord {
                    date: row[date_idx].as_date()?,
                    total_revenue: number_at(&sorted, row, "Total Revenue"),
                    total_assets: number_at(&sorted, row, "Total Assets"),
                    total_liabilities: number_at(&sorted, row, "Total Liabilities"),
                    long_term_debt: number_at(&sorted, row, "Long Term Debt"),
                    shareholders_equity: number_at(&sorted, row, "Shareholders_Equity"),
                    return_on_equity: number_at(&sorted, row, "Return on Equity"),
                    return_on_assets: number_at(&sorted, row, "Return on Assets"),
                    return_on_investment: number_at(&sorted, row, "Return on Investment"),
                })
            })
            .collect()
    }
}

impl CommodityRecord {
    pub fn from_table(table: &Table) -> Vec<CommodityRecord> {
        let Some(date_idx) = table.column_index("Date") else {
            return Vec::new();
        };
        let sorted = table.sorted_by_date("Date");
        sorted
            .rows()
            .iter()
            .filter_map(|row| {
                Some(CommodityRecord {
                    date: row[date_idx].as_date()?,
                    cpi: number_at(&sorted, row, "CPI"),
                    oil: number_at(&sorted, row, "Oil"),
                    copper: number_at(&sorted, row, "Copper"),
                    gdp: number_at(&sorted, row, "GDP"),
                })
            })
            .collect()
    }
}
