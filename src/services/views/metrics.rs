// src/services/views/metrics.rs
use chrono::Datelike;
use log::debug;
use serde::Serialize;

use crate::services::calculations::ColumnSummary;
use crate::services::store::{DataStore, DATE_COLUMN};
use super::{
    card, latest_label, section, ChartSection, MetricCard, ReferenceLine, SectionSpec, Series,
    ValueStyle, ACCENT, NEGATIVE, PRIMARY, PURPLE, SECONDARY, TEAL,
};

pub const TARGET_ROE: f64 = 15.0;

#[derive(Debug, Serialize)]
pub struct FinancialHeader {
    pub first_year: i32,
    pub last_year: i32,
    pub records: usize,
    pub latest: String,
}

#[derive(Debug, Serialize)]
pub struct FinancialMetricsView {
    pub title: &'static str,
    pub notice: Option<String>,
    pub header: Option<FinancialHeader>,
    pub cards: Vec<MetricCard>,
    pub sections: Vec<ChartSection>,
}

const SECTIONS: [SectionSpec; 5] = [
    SectionSpec {
        column: "Total Assets",
        title: "Assets Analysis",
        chart_title: "Total Assets Over Time",
        series_name: "Total Assets",
        y_axis: "Amount ($)",
        color: PRIMARY,
        label: "Assets",
        latest_icon: "🏦",
        style: ValueStyle::Magnitude,
    },
    SectionSpec {
        column: "Total Liabilities",
        title: "Liabilities Analysis",
        chart_title: "Total Liabilities Over Time",
        series_name: "Total Liabilities",
        y_axis: "Amount ($)",
        color: SECONDARY,
        label: "Liabilities",
        latest_icon: "🏦",
        style: ValueStyle::Magnitude,
    },
    SectionSpec {
        column: "Total Revenue",
        title: "Revenue Analysis",
        chart_title: "Total Revenue Over Time",
        series_name: "Total Revenue",
        y_axis: "Amount ($)",
        color: ACCENT,
        label: "Revenue",
        latest_icon: "💰",
        style: ValueStyle::Magnitude,
    },
    SectionSpec {
        column: "Long Term Debt",
        title: "Debt Analysis",
        chart_title: "Long Term Debt Over Time",
        series_name: "Long Term Debt",
        y_axis: "Amount ($)",
        color: PURPLE,
        label: "Debt",
        latest_icon: "🏦",
        style: ValueStyle::Magnitude,
    },
    SectionSpec {
        column: "Shareholders_Equity",
        title: "Equity Analysis",
        chart_title: "Shareholder's Equity Over Time",
        series_name: "Shareholder's Equity",
        y_axis: "Amount ($)",
        color: TEAL,
        label: "Equity",
        latest_icon: "🏦",
        style: ValueStyle::Magnitude,
    },
];

const RETURNS: [(&str, &str, &str); 3] = [
    ("Return on Equity", "ROE", PRIMARY),
    ("Return on Assets", "ROA", SECONDARY),
    ("Return on Investment", "ROI", ACCENT),
];

fn headline_cards(store: &DataStore) -> Vec<MetricCard> {
    let table = &store.financials;
    let summary = |column| ColumnSummary::from_table(table, DATE_COLUMN, column);
    let mut cards = Vec::new();

    if let Some(rev) = summary("Total Revenue") {
        cards.push(
            card("Latest Revenue", "💰", rev.latest, Some(rev.previous), ValueStyle::Magnitude)
                .for_period(rev.latest_date),
        );
    }
    if let Some(assets) = summary("Total Assets") {
        cards.push(card("Avg. Monthly Assets", "🏦", assets.mean, None, ValueStyle::Magnitude));
        cards.push(card("Total Assets (Period)", "📈", assets.sum, None, ValueStyle::Magnitude));
    }
    if let Some(roe) = summary("Return on Equity") {
        cards.push(
            card("ROE vs Target", "🎯", roe.latest, Some(TARGET_ROE), ValueStyle::Magnitude)
                .for_period(roe.latest_date),
        );
    }
    cards
}

fn returns_section(store: &DataStore) -> ChartSection {
    let table = &store.financials;
    let series = RETURNS
        .iter()
        .filter(|(column, _, _)| table.has_column(column))
        .map(|(column, name, color)| Series::from_table(table, column, *name, *color))
        .collect();
    let cards = RETURNS
        .iter()
        .filter_map(|(column, name, _)| {
            let s = ColumnSummary::from_table(table, DATE_COLUMN, column)?;
            Some(
                card(format!("Latest {}", name), "📊", s.latest, None, ValueStyle::Magnitude)
                    .for_period(s.latest_date),
            )
        })
        .collect();

    ChartSection {
        title: "Return Metrics Analysis",
        chart_title: "Return Metrics Over Time",
        y_axis: "Percentage",
        series,
        reference_line: Some(ReferenceLine {
            value: TARGET_ROE,
            label: format!("Target ROE: {:.1}%", TARGET_ROE),
            color: NEGATIVE,
        }),
        cards,
        notice: None,
    }
}

pub fn financial_metrics(store: &DataStore) -> FinancialMetricsView {
    let table = &store.financials;
    let mut view = FinancialMetricsView {
        title: "Financial Performance Dashboard",
        notice: None,
        header: None,
        cards: Vec::new(),
        sections: Vec::new(),
    };

    if table.is_empty() {
        view.notice = Some("No financial data available".to_string());
        return view;
    }

    view.header = table.date_range(DATE_COLUMN).map(|(first, last)| FinancialHeader {
        first_year: first.year(),
        last_year: last.year(),
        records: table.len(),
        latest: latest_label(table).unwrap_or_default(),
    });
    view.cards = headline_cards(store);
    view.sections = SECTIONS.iter().map(|spec| section(table, spec)).collect();
    view.sections.push(returns_section(store));

    debug!("Built financial metrics view with {} sections", view.sections.len());
    view
}
