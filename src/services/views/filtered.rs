// src/services/views/filtered.rs
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::services::aggregate::{
    aggregate, combine, filter_source, selectable_columns, AggregateBucket, AggregateError,
    DatasetFilter, Granularity,
};
use crate::services::store::{DataStore, DATE_COLUMN};

/// Raw query string of the filtered view; every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FilteredQuery {
    pub dataset: Option<String>,
    pub metric: Option<String>,
    pub aggregation: Option<String>,
    pub show_table: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredSelection {
    pub dataset: DatasetFilter,
    /// `None` picks the first selectable metric.
    pub metric: Option<String>,
    pub granularity: Granularity,
    pub show_table: bool,
}

impl TryFrom<FilteredQuery> for FilteredSelection {
    type Error = AggregateError;

    fn try_from(query: FilteredQuery) -> Result<Self, Self::Error> {
        Ok(FilteredSelection {
            dataset: query
                .dataset
                .as_deref()
                .map(str::parse::<DatasetFilter>)
                .transpose()?
                .unwrap_or_default(),
            metric: query.metric.filter(|m| !m.trim().is_empty()),
            granularity: query
                .aggregation
                .as_deref()
                .map(str::parse::<Granularity>)
                .transpose()?
                .unwrap_or_default(),
            show_table: query.show_table.unwrap_or(false),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub datasets: Vec<SelectOption>,
    pub metrics: Vec<String>,
    pub aggregations: Vec<SelectOption>,
}

#[derive(Debug, Serialize)]
pub struct AggregateRow {
    pub period: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct FilteredView {
    pub title: &'static str,
    pub notice: Option<String>,
    pub options: FilterOptions,
    pub dataset: DatasetFilter,
    pub metric: Option<String>,
    pub aggregation: Granularity,
    pub chart_title: Option<String>,
    pub x_axis: &'static str,
    pub buckets: Vec<AggregateBucket>,
    pub table: Option<Vec<AggregateRow>>,
}

fn chart_title(metric: &str, granularity: Granularity) -> String {
    match granularity {
        Granularity::Monthly => format!("Average Monthly {} (Across Years)", metric),
        Granularity::Yearly => format!("Yearly {}", metric),
    }
}

/// Builds the filtered view from a fresh combined copy of the store's tables.
pub fn filtered(store: &DataStore, selection: &FilteredSelection) -> Result<FilteredView, AggregateError> {
    let combined = combine(&store.financials, &store.commodities, DATE_COLUMN);
    let table = filter_source(&combined, selection.dataset);
    let metrics = selectable_columns(&table);
    debug!(
        "Filtered view: {} rows for {}, {} selectable metrics",
        table.len(),
        selection.dataset.label(),
        metrics.len()
    );

    let metric = match &selection.metric {
        Some(m) if metrics.contains(m) => Some(m.clone()),
        Some(m) => return Err(AggregateError::NotAggregatable(m.clone())),
        None => metrics.first().cloned(),
    };

    let mut view = FilteredView {
        title: "Data Explorer with Filters",
        notice: None,
        options: FilterOptions {
            datasets: DatasetFilter::ALL
                .iter()
                .map(|d| SelectOption {
                    value: d.source_tag().unwrap_or("all"),
                    label: d.label(),
                })
                .collect(),
            metrics,
            aggregations: Granularity::ALL
                .iter()
                .map(|g| SelectOption {
                    value: match g {
                        Granularity::Monthly => "monthly",
                        Granularity::Yearly => "yearly",
                    },
                    label: g.label(),
                })
                .collect(),
        },
        dataset: selection.dataset,
        metric: metric.clone(),
        aggregation: selection.granularity,
        chart_title: None,
        x_axis: "Time Period",
        buckets: Vec::new(),
        table: None,
    };

    let Some(metric) = metric else {
        view.notice = Some("No data available".to_string());
        return Ok(view);
    };

    let buckets = aggregate(&table, DATE_COLUMN, &metric, selection.granularity)?;
    info!(
        "Aggregated {} ({}) into {} buckets",
        metric,
        selection.granularity.label(),
        buckets.len()
    );

    if selection.show_table {
        view.table = Some(
            buckets
                .iter()
                .map(|b| AggregateRow {
                    period: b.bucket.to_string(),
                    value: format!("{:.2}", b.value),
                })
                .collect(),
        );
    }
    view.chart_title = Some(chart_title(&metric, selection.granularity));
    view.buckets = buckets;
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, Table};
    use crate::services::aggregate::Bucket;
    use chrono::NaiveDate;

    fn dated(column: &str, rows: &[(i32, u32, f64)]) -> Table {
        Table::new(
            vec!["Date".into(), column.to_string()],
            rows.iter()
                .map(|(y, m, v)| {
                    vec![
                        Cell::Date(NaiveDate::from_ymd_opt(*y, *m, 1).unwrap()),
                        Cell::Number(*v),
                    ]
                })
                .collect(),
        )
    }

    fn store() -> DataStore {
        DataStore::from_tables(
            dated("Total Revenue", &[(2021, 3, 10.0), (2022, 3, 20.0), (2022, 1, 5.0)]),
            dated("Oil", &[(2021, 2, 60.0), (2022, 2, 80.0)]),
            Table::empty(),
        )
    }

    #[test]
    fn test_defaults_pick_first_metric_monthly() {
        let view = filtered(&store(), &FilteredSelection::default()).unwrap();
        assert_eq!(view.options.metrics, vec!["Total Revenue", "Oil"]);
        assert_eq!(view.metric.as_deref(), Some("Total Revenue"));
        assert_eq!(view.chart_title.as_deref(), Some("Average Monthly Total Revenue (Across Years)"));
        let labels: Vec<String> = view.buckets.iter().map(|b| b.bucket.to_string()).collect();
        assert_eq!(labels, vec!["January", "March"]);
        assert_eq!(view.buckets[1].value, 15.0);
        assert!(view.table.is_none());
    }

    #[test]
    fn test_commodities_yearly_with_table() {
        let selection = FilteredSelection {
            dataset: DatasetFilter::Commodities,
            metric: Some("Oil".into()),
            granularity: Granularity::Yearly,
            show_table: true,
        };
        let view = filtered(&store(), &selection).unwrap();
        assert_eq!(view.options.metrics, vec!["Oil"]);
        assert_eq!(view.buckets[0].bucket, Bucket::Year(2021));
        let table = view.table.unwrap();
        assert_eq!(table[1].period, "2022");
        assert_eq!(table[1].value, "80.00");
    }

    #[test]
    fn test_metric_outside_dataset_is_rejected() {
        let selection = FilteredSelection {
            dataset: DatasetFilter::Financial,
            metric: Some("Oil".into()),
            ..FilteredSelection::default()
        };
        assert_eq!(
            filtered(&store(), &selection).unwrap_err(),
            AggregateError::NotAggregatable("Oil".into())
        );
    }

    #[test]
    fn test_repeated_requests_are_identical() {
        let store = store();
        let first = serde_json::to_value(filtered(&store, &FilteredSelection::default()).unwrap()).unwrap();
        let second = serde_json::to_value(filtered(&store, &FilteredSelection::default()).unwrap()).unwrap();
        assert_eq!(first, second);
        assert!(!store.financials.has_column("source"));
    }

    #[test]
    fn test_no_data_notice() {
        let view = filtered(&DataStore::default(), &FilteredSelection::default()).unwrap();
        assert_eq!(view.notice.as_deref(), Some("No data available"));
        assert!(view.buckets.is_empty());
    }

    #[test]
    fn test_query_parsing() {
        let query = FilteredQuery {
            dataset: Some("Financial".into()),
            metric: Some(" ".into()),
            aggregation: Some("yearly".into()),
            show_table: Some(true),
        };
        let selection = FilteredSelection::try_from(query).unwrap();
        assert_eq!(selection.dataset, DatasetFilter::Financial);
        assert_eq!(selection.metric, None);
        assert_eq!(selection.granularity, Granularity::Yearly);
        assert!(selection.show_table);

        let bad = FilteredQuery {
            aggregation: Some("weekly".into()),
            ..FilteredQuery::default()
        };
        assert!(FilteredSelection::try_from(bad).is_err());
    }
}
