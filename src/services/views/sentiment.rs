// src/services/views/sentiment.rs
use log::warn;
use serde::Serialize;

use crate::services::formatter::format_metric;
use crate::services::loader::{resolve_column, ColumnResolution, SENTIMENT_SCORE_ALIASES};
use crate::services::sentiment::{
    histogram, mean_score, polarity_counts, HistogramBin, Polarity, HISTOGRAM_BINS,
};
use crate::services::store::DataStore;
use super::{MetricCard, ReferenceLine, NEGATIVE, NEUTRAL, POSITIVE};

#[derive(Debug, Serialize)]
pub struct PieSlice {
    pub label: &'static str,
    pub count: usize,
    pub percent: f64,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SentimentView {
    pub title: &'static str,
    pub notice: Option<String>,
    pub score_column: Option<String>,
    pub histogram: Vec<HistogramBin>,
    pub reference_lines: Vec<ReferenceLine>,
    pub cards: Vec<MetricCard>,
    pub pie: Vec<PieSlice>,
}

fn polarity_style(polarity: Polarity) -> (&'static str, &'static str, &'static str) {
    match polarity {
        Polarity::Positive => ("Positive", "👍", POSITIVE),
        Polarity::Neutral => ("Neutral", "😐", NEUTRAL),
        Polarity::Negative => ("Negative", "👎", NEGATIVE),
    }
}

pub fn news_sentiment(store: &DataStore) -> SentimentView {
    let table = &store.sentiment;
    let mut view = SentimentView {
        title: "News Sentiment Analysis",
        notice: None,
        score_column: None,
        histogram: Vec::new(),
        reference_lines: Vec::new(),
        cards: Vec::new(),
        pie: Vec::new(),
    };

    if table.is_empty() {
        view.notice = Some("No sentiment data loaded".to_string());
        return view;
    }

    let column = match resolve_column(table, SENTIMENT_SCORE_ALIASES) {
        ColumnResolution::Found(column) => column,
        ColumnResolution::Missing { available } => {
            warn!("No sentiment score column among {:?}", available);
            view.notice = Some(format!(
                "Sentiment column not found. Available columns: {}",
                available.join(", ")
            ));
            return view;
        }
    };

    let scores = table.numbers(&column);
    view.score_column = Some(column.clone());
    if scores.is_empty() {
        view.notice = Some(format!("Sentiment column '{}' has no numeric scores", column));
        return view;
    }

    let mean = mean_score(&scores);
    view.histogram = histogram(&scores, HISTOGRAM_BINS);
    view.reference_lines = vec![
        ReferenceLine {
            value: 0.0,
            label: "Neutral".to_string(),
            color: NEUTRAL,
        },
        ReferenceLine {
            value: mean,
            label: format!("Mean: {:.2}", mean),
            color: NEGATIVE,
        },
    ];

    for count in polarity_counts(&scores) {
        let (label, icon, color) = polarity_style(count.polarity);
        let display = format!("{} ({:.1}%)", count.count, count.percent);
        view.cards.push(MetricCard::new(label, icon, format_metric(display, None)));
        view.pie.push(PieSlice {
            label,
            count: count.count,
            percent: count.percent,
            color,
        });
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, Table};

    fn sentiment(columns: &[&str], scores: &[f64]) -> Table {
        Table::new(
            columns.iter().map(|c| c.to_string()).collect(),
            scores
                .iter()
                .map(|s| vec![Cell::Text("headline".into()), Cell::Number(*s)])
                .collect(),
        )
    }

    #[test]
    fn test_counts_come_from_scores() {
        let table = sentiment(&["title", "score"], &[0.5, 0.1, 0.0, -0.3, 0.2]);
        let store = DataStore::from_tables(Table::empty(), Table::empty(), table);
        let view = news_sentiment(&store);

        assert_eq!(view.score_column.as_deref(), Some("score"));
        let cards: Vec<(&str, &str)> = view
            .cards
            .iter()
            .map(|c| (c.title.as_str(), c.value.as_str()))
            .collect();
        assert_eq!(
            cards,
            vec![("Positive", "3 (60.0%)"), ("Neutral", "1 (20.0%)"), ("Negative", "1 (20.0%)")]
        );
        assert_eq!(view.pie.iter().map(|p| p.count).sum::<usize>(), 5);
        assert_eq!(view.reference_lines[1].label, "Mean: 0.10");
        assert!(!view.histogram.is_empty());
    }

    #[test]
    fn test_unresolved_column_lists_available() {
        let table = sentiment(&["title", "polarity"], &[0.5]);
        let store = DataStore::from_tables(Table::empty(), Table::empty(), table);
        let view = news_sentiment(&store);

        assert_eq!(
            view.notice.as_deref(),
            Some("Sentiment column not found. Available columns: title, polarity")
        );
        assert!(view.histogram.is_empty());
        assert!(view.cards.is_empty());
    }

    #[test]
    fn test_empty_sentiment() {
        let view = news_sentiment(&DataStore::default());
        assert_eq!(view.notice.as_deref(), Some("No sentiment data loaded"));
    }
}
