//! Typed results produced by the metrics engine.

use serde::Serialize;

/// Aggregate over one time window. `total_elapsed` and `average_elapsed`
/// are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateStatistics {
    pub count: u64,
    pub total_elapsed: f64,
    pub average_elapsed: f64,
}

/// Display-format token for a metric value. Rendering belongs to the
/// presentation layer; the engine only tags each metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFormat {
    /// Whole number, e.g. a job count.
    Integer,
    /// Whole seconds, e.g. "60s".
    Seconds,
    /// Seconds with two decimals, e.g. "20.00s".
    Seconds2dp,
}

impl MetricFormat {
    /// Render `value` under this format, for text frontends (the CLI).
    pub fn render(&self, value: f64) -> String {
        match self {
            Self::Integer => format!("{}", value.round() as i64),
            Self::Seconds => format!("{}s", value.round() as i64),
            Self::Seconds2dp => format!("{:.2}s", value),
        }
    }
}

/// Period-over-period change of one metric value.
///
/// `NoBaseline` is the explicit degenerate case for a zero previous value;
/// the division is never performed, so no NaN/Inf artifact can leak out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PercentageChange {
    Pct(f64),
    NoBaseline,
}

impl PercentageChange {
    pub fn from_values(current: f64, previous: f64) -> Self {
        if previous == 0.0 {
            Self::NoBaseline
        } else {
            Self::Pct((current - previous) / previous * 100.0)
        }
    }
}

/// One named statistic compared across the two windows.
#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub current_value: f64,
    pub previous_value: f64,
    pub format: MetricFormat,
    pub change: PercentageChange,
}

impl Metric {
    pub fn new(
        label: &'static str,
        current_value: f64,
        previous_value: f64,
        format: MetricFormat,
    ) -> Self {
        Self {
            label,
            current_value,
            previous_value,
            format,
            change: PercentageChange::from_values(current_value, previous_value),
        }
    }
}

/// The full metrics report: exactly three metrics in fixed order.
#[derive(Debug, Clone, Serialize)]
pub struct Metrics {
    pub window_days: u32,
    pub metrics: Vec<Metric>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_change() {
        assert_eq!(
            PercentageChange::from_values(150.0, 100.0),
            PercentageChange::Pct(50.0)
        );
        assert_eq!(
            PercentageChange::from_values(50.0, 100.0),
            PercentageChange::Pct(-50.0)
        );
    }

    #[test]
    fn test_zero_baseline_is_explicit_not_a_divide() {
        assert_eq!(
            PercentageChange::from_values(50.0, 0.0),
            PercentageChange::NoBaseline
        );
        assert_eq!(
            PercentageChange::from_values(0.0, 0.0),
            PercentageChange::NoBaseline
        );
    }

    #[test]
    fn test_format_rendering() {
        assert_eq!(MetricFormat::Integer.render(3.0), "3");
        assert_eq!(MetricFormat::Seconds.render(60.0), "60s");
        assert_eq!(MetricFormat::Seconds2dp.render(20.0), "20.00s");
    }
}
