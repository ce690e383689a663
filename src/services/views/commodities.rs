// src/services/views/commodities.rs
use serde::Serialize;

use crate::services::calculations::ColumnSummary;
use crate::services::store::{DataStore, DATE_COLUMN};
use super::{
    card, latest_label, section, ChartSection, MetricCard, SectionSpec, ValueStyle, PRIMARY,
    PURPLE, SECONDARY, TEAL,
};

#[derive(Debug, Serialize)]
pub struct CommoditiesHeader {
    pub records: usize,
    pub latest: String,
}

#[derive(Debug, Serialize)]
pub struct CommoditiesView {
    pub title: &'static str,
    pub notice: Option<String>,
    pub header: Option<CommoditiesHeader>,
    pub cards: Vec<MetricCard>,
    pub sections: Vec<ChartSection>,
}

const SECTIONS: [SectionSpec; 4] = [
    SectionSpec {
        column: "CPI",
        title: "Consumer Price Index (CPI)",
        chart_title: "CPI Over Time",
        series_name: "CPI",
        y_axis: "Index Value",
        color: PRIMARY,
        label: "CPI",
        latest_icon: "📉",
        style: ValueStyle::Fixed,
    },
    SectionSpec {
        column: "GDP",
        title: "Gross Domestic Product (GDP)",
        chart_title: "GDP Over Time",
        series_name: "GDP",
        y_axis: "Value",
        color: SECONDARY,
        label: "GDP",
        latest_icon: "📈",
        style: ValueStyle::Grouped,
    },
    SectionSpec {
        column: "Oil",
        title: "Oil Prices",
        chart_title: "Oil Prices Over Time",
        series_name: "Oil Price",
        y_axis: "Price per Barrel ($)",
        color: PURPLE,
        label: "Oil Price",
        latest_icon: "🛢️",
        style: ValueStyle::Fixed,
    },
    SectionSpec {
        column: "Copper",
        title: "Copper Prices",
        chart_title: "Copper Prices Over Time",
        series_name: "Copper Price",
        y_axis: "Price per Metric Ton ($)",
        color: TEAL,
        label: "Copper Price",
        latest_icon: "🔶",
        style: ValueStyle::Fixed,
    },
];

pub fn commodities(store: &DataStore) -> CommoditiesView {
    let table = &store.commodities;
    let mut view = CommoditiesView {
        title: "Commodities & Macroeconomic Factors Dashboard",
        notice: None,
        header: None,
        cards: Vec::new(),
        sections: Vec::new(),
    };

    if table.is_empty() {
        view.notice = Some("No commodities data available".to_string());
        return view;
    }

    view.header = Some(CommoditiesHeader {
        records: table.len(),
        latest: latest_label(table).unwrap_or_default(),
    });

    let summary = |column| ColumnSummary::from_table(table, DATE_COLUMN, column);
    if let Some(cpi) = summary("CPI") {
        view.cards.push(
            card("Latest CPI", "📉", cpi.latest, Some(cpi.previous), ValueStyle::Fixed)
                .for_period(cpi.latest_date),
        );
    }
    if let Some(gdp) = summary("GDP") {
        view.cards.push(card("Avg. GDP", "📈", gdp.mean, None, ValueStyle::Grouped));
    }
    if let Some(oil) = summary("Oil") {
        view.cards.push(card("Oil Price", "🛢️", oil.latest, None, ValueStyle::Fixed).for_period(oil.latest_date));
    }
    if let Some(copper) = summary("Copper") {
        view.cards.push(
            card("Copper Price", "🔶", copper.latest, None, ValueStyle::Fixed).for_period(copper.latest_date),
        );
    }

    view.sections = SECTIONS.iter().map(|spec| section(table, spec)).collect();
    view
}
