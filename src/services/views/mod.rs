// src/services/views/mod.rs
//! View documents for the dashboard pages. Each builder reads the shared
//! store and returns a serializable document for the web UI to render.

pub mod commodities;
pub mod explorer;
pub mod filtered;
pub mod metrics;
pub mod sentiment;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Table;
use super::calculations::{series, ColumnSummary};
use super::formatter::{format_metric, with_commas, Direction, FormattedMetric};
use super::store::{DataStore, DATE_COLUMN};

pub const PRIMARY: &str = "#1a5276";
pub const SECONDARY: &str = "#2980b9";
pub const ACCENT: &str = "#3498db";
pub const POSITIVE: &str = "#27ae60";
pub const NEGATIVE: &str = "#e74c3c";
pub const NEUTRAL: &str = "#7f8c8d";
pub const PURPLE: &str = "#8e44ad";
pub const TEAL: &str = "#16a085";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    FinancialMetrics,
    DataExplorer,
    CommoditiesMacro,
    NewsSentiments,
    FilteredVisualizations,
}

impl View {
    pub const ALL: [View; 5] = [
        View::FinancialMetrics,
        View::DataExplorer,
        View::CommoditiesMacro,
        View::NewsSentiments,
        View::FilteredVisualizations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::FinancialMetrics => "Financial Metrics",
            View::DataExplorer => "Data Explorer",
            View::CommoditiesMacro => "Commodities & Macro",
            View::NewsSentiments => "News Sentiments",
            View::FilteredVisualizations => "Filtered Visualizations",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            View::FinancialMetrics => "📈",
            View::DataExplorer => "📊",
            View::CommoditiesMacro => "🛢️",
            View::NewsSentiments => "📰",
            View::FilteredVisualizations => "📊",
        }
    }

    /// Route under `/api/v1/`.
    pub fn path(self) -> &'static str {
        match self {
            View::FinancialMetrics => "metrics",
            View::DataExplorer => "explorer",
            View::CommoditiesMacro => "commodities",
            View::NewsSentiments => "sentiment",
            View::FilteredVisualizations => "filtered",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NavEntry {
    pub view: View,
    pub label: &'static str,
    pub icon: &'static str,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct Navigation {
    pub title: &'static str,
    pub views: Vec<NavEntry>,
    pub warnings: Vec<String>,
}

pub fn navigation(store: &DataStore) -> Navigation {
    Navigation {
        title: "Financial Analytics Dashboard",
        views: View::ALL
            .iter()
            .map(|v| NavEntry {
                view: *v,
                label: v.label(),
                icon: v.icon(),
                path: format!("/api/v1/{}", v.path()),
            })
            .collect(),
        warnings: store.warnings.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: String,
    pub icon: &'static str,
    pub value: String,
    /// Arrow, absolute change and percent, e.g. "↑ 10.00 (10.0%)".
    pub delta: Option<String>,
    pub delta_pct: Option<f64>,
    pub direction: Option<Direction>,
    /// Period the value was reported for, e.g. "Feb 2024"; set on latest-value cards.
    pub period: Option<String>,
}

impl MetricCard {
    pub fn new(title: impl Into<String>, icon: &'static str, metric: FormattedMetric) -> Self {
        let delta = metric.delta.as_ref().map(|_| metric.delta_text());
        MetricCard {
            title: title.into(),
            icon,
            value: metric.display,
            delta,
            delta_pct: metric.delta_pct,
            direction: metric.direction,
            period: None,
        }
    }

    pub fn for_period(mut self, date: Option<NaiveDate>) -> Self {
        self.period = date.map(period_label);
        self
    }
}

/// How a card renders its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStyle {
    /// `$1.5M` / `$2.5K` / `42.68`
    Magnitude,
    /// `{:.2}`
    Fixed,
    /// `{:,.2}`
    Grouped,
}

pub fn card(
    title: impl Into<String>,
    icon: &'static str,
    value: f64,
    previous: Option<f64>,
    style: ValueStyle,
) -> MetricCard {
    let metric = format_metric(value, previous);
    let metric = match style {
        ValueStyle::Magnitude => metric,
        ValueStyle::Fixed => metric.with_display(format!("{:.2}", value)),
        ValueStyle::Grouped => metric.with_display(with_commas(value, 2)),
    };
    MetricCard::new(title, icon, metric)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: &'static str,
    pub color: &'static str,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn from_table(table: &Table, column: &str, name: &'static str, color: &'static str) -> Self {
        Series {
            name,
            color,
            points: series(table, DATE_COLUMN, column)
                .into_iter()
                .map(|(date, value)| SeriesPoint { date, value })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSection {
    pub title: &'static str,
    pub chart_title: &'static str,
    pub y_axis: &'static str,
    pub series: Vec<Series>,
    pub reference_line: Option<ReferenceLine>,
    pub cards: Vec<MetricCard>,
    pub notice: Option<String>,
}

/// One single-series section with Latest/Max/Min/Avg cards.
pub struct SectionSpec {
    pub column: &'static str,
    pub title: &'static str,
    pub chart_title: &'static str,
    pub series_name: &'static str,
    pub y_axis: &'static str,
    pub color: &'static str,
    /// Card noun, e.g. "Assets" in "Max Assets".
    pub label: &'static str,
    pub latest_icon: &'static str,
    pub style: ValueStyle,
}

pub fn missing_column_notice(column: &str, table: &Table) -> String {
    format!(
        "Column '{}' not found. Available columns: {}",
        column,
        table.columns().join(", ")
    )
}

pub fn section(table: &Table, spec: &SectionSpec) -> ChartSection {
    let mut section = ChartSection {
        title: spec.title,
        chart_title: spec.chart_title,
        y_axis: spec.y_axis,
        series: Vec::new(),
        reference_line: None,
        cards: Vec::new(),
        notice: None,
    };

    if !table.has_column(spec.column) {
        section.notice = Some(missing_column_notice(spec.column, table));
        return section;
    }

    section.series = vec![Series::from_table(table, spec.column, spec.series_name, spec.color)];
    match ColumnSummary::from_table(table, DATE_COLUMN, spec.column) {
        Some(s) => {
            section.cards = vec![
                card(format!("Latest {}", spec.label), spec.latest_icon, s.latest, Some(s.previous), spec.style)
                    .for_period(s.latest_date),
                card(format!("Max {}", spec.label), "📈", s.max, None, spec.style),
                card(format!("Min {}", spec.label), "📉", s.min, None, spec.style),
                card(format!("Avg. {}", spec.label), "📊", s.mean, None, spec.style),
            ];
        }
        None => section.notice = Some(format!("No numeric values for {}", spec.column)),
    }
    section
}

pub fn period_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Latest period as "Mar 2024".
pub fn latest_label(table: &Table) -> Option<String> {
    table.date_range(DATE_COLUMN).map(|(_, max)| period_label(max))
}
