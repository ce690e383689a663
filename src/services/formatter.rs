// src/services/formatter.rs
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedMetric {
    pub display: String,
    /// `"{abs(delta)} ({abs(pct)}%)"`, without the arrow.
    pub delta: Option<String>,
    pub delta_pct: Option<f64>,
    pub direction: Option<Direction>,
}

impl FormattedMetric {
    /// Delta line as shown on a card, e.g. `"↑ 10.00 (10.0%)"`. Empty without a delta.
    pub fn delta_text(&self) -> String {
        match (&self.delta, self.direction) {
            (Some(delta), Some(direction)) => format!("{} {}", direction.arrow(), delta),
            _ => String::new(),
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }
}

/// `value` with `decimals` places and comma thousands separators, like Python's `{:,.2f}`.
pub fn with_commas(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn display_number(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("${}M", with_commas(value / 1_000_000.0, 1))
    } else if value.abs() >= 1_000.0 {
        format!("${}K", with_commas(value / 1_000.0, 1))
    } else {
        with_commas(value, 2)
    }
}

/// Percent change from `previous` to `value`; 0 when `previous` is 0.
pub fn percent_change(value: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (value - previous) / previous * 100.0
    }
}

pub fn format_metric(value: impl Into<MetricValue>, previous: Option<f64>) -> FormattedMetric {
    match value.into() {
        MetricValue::Text(text) => FormattedMetric {
            display: text,
            delta: None,
            delta_pct: None,
            direction: None,
        },
        MetricValue::Number(value) => {
            let display = display_number(value);
            match previous {
                Some(previous) => {
                    let delta = value - previous;
                    let delta_pct = percent_change(value, previous);
                    FormattedMetric {
                        display,
                        delta: Some(format!(
                            "{} ({:.1}%)",
                            with_commas(delta.abs(), 2),
                            delta_pct.abs()
                        )),
                        delta_pct: Some(delta_pct),
                        direction: Some(if delta >= 0.0 { Direction::Up } else { Direction::Down }),
                    }
                }
                None => FormattedMetric {
                    display,
                    delta: None,
                    delta_pct: None,
                    direction: None,
                },
            }
        }
    }
}
