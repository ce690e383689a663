// src/services/sentiment.rs
use serde::Serialize;

use super::calculations::calculate_average;

pub const HISTOGRAM_BINS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Polarity {
    Positive,
    Neutral,
    Negative,
}

impl Polarity {
    pub fn of(score: f64) -> Polarity {
        if score > 0.0 {
            Polarity::Positive
        } else if score < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolarityCount {
    pub polarity: Polarity,
    pub count: usize,
    pub percent: f64,
}

/// Equal-width bins over min..=max. The last bin is closed so the max lands in it.
pub fn histogram(scores: &[f64], bins: usize) -> Vec<HistogramBin> {
    if scores.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: scores.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &s in scores {
        let idx = (((s - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

/// Positive, neutral and negative counts in that order, with their share of all scores.
pub fn polarity_counts(scores: &[f64]) -> Vec<PolarityCount> {
    let total = scores.len();
    [Polarity::Positive, Polarity::Neutral, Polarity::Negative]
        .into_iter()
        .map(|polarity| {
            let count = scores.iter().filter(|s| Polarity::of(**s) == polarity).count();
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            PolarityCount {
                polarity,
                count,
                percent,
            }
        })
        .collect()
}

pub fn mean_score(scores: &[f64]) -> f64 {
    calculate_average(scores)
}
