use std::collections::HashSet;

use crate::domain::SeriesMode;
use crate::models::{ActivityRecord, MonthlyRecord};
use crate::slot::Slot;
use crate::table::Tone;

pub const BUY_SERIES_LABEL: &str = "BUY (unique senators)";
pub const SELL_SERIES_LABEL: &str = "SELL (unique senators)";
pub const SENATORS_SERIES_LABEL: &str = "# Senators";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    pub label: String,
    pub tone: Tone,
    pub values: Vec<u64>,
}

/// Everything a front-end needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetSpec>,
}

impl ChartSpec {
    /// Largest value across all datasets, at least 1 so axes never collapse.
    pub fn max_value(&self) -> u64 {
        self.datasets
            .iter()
            .flat_map(|dataset| dataset.values.iter().copied())
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// First, middle and last category labels for a line chart's x axis.
    pub fn x_axis_labels(&self) -> Vec<String> {
        let Some(last) = self.labels.len().checked_sub(1) else {
            return Vec::new();
        };
        let mut picks = vec![0, last / 2, last];
        picks.dedup();
        picks.into_iter().map(|index| self.labels[index].clone()).collect()
    }

    /// Zero, half and the maximum, for a y axis.
    pub fn y_axis_labels(&self) -> Vec<String> {
        let max = self.max_value();
        vec!["0".to_string(), max.div_ceil(2).to_string(), max.to_string()]
    }
}

pub type ChartSlot = Slot<ChartSpec>;

/// Monthly unique-senator counts for one ticker. `mode` picks the series.
pub fn timeseries_chart(ticker: &str, rows: &[MonthlyRecord], mode: SeriesMode) -> ChartSpec {
    let labels = rows.iter().map(|row| row.month_start.clone()).collect();
    let mut datasets = Vec::new();

    if mode.includes_buy() {
        datasets.push(DatasetSpec {
            label: BUY_SERIES_LABEL.to_string(),
            tone: Tone::Success,
            values: rows.iter().map(|row| row.buy_senators.unwrap_or(0)).collect(),
        });
    }
    if mode.includes_sell() {
        datasets.push(DatasetSpec {
            label: SELL_SERIES_LABEL.to_string(),
            tone: Tone::Danger,
            values: rows.iter().map(|row| row.sell_senators.unwrap_or(0)).collect(),
        });
    }

    ChartSpec {
        kind: ChartKind::Line,
        title: format!("{ticker}: unique senators per month"),
        labels,
        datasets,
    }
}

/// Bar chart of the tickers ranked in `bucket`.
pub fn top_tickers_chart(rows: &[ActivityRecord], bucket: &str) -> ChartSpec {
    let in_bucket: Vec<&ActivityRecord> = rows.iter().filter(|row| row.bucket_start == bucket).collect();

    ChartSpec {
        kind: ChartKind::Bar,
        title: format!("Top tickers for {bucket}"),
        labels: in_bucket.iter().map(|row| row.ticker.clone()).collect(),
        datasets: vec![DatasetSpec {
            label: SENATORS_SERIES_LABEL.to_string(),
            tone: Tone::Primary,
            values: in_bucket.iter().map(|row| row.n_senators).collect(),
        }],
    }
}

/// Bucket starts in first-seen order. The API sends newest first.
pub fn distinct_buckets(rows: &[ActivityRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| seen.insert(row.bucket_start.as_str()))
        .map(|row| row.bucket_start.clone())
        .collect()
}

/// Keeps `previous` if it is still offered, otherwise picks the first bucket.
pub fn choose_bucket(previous: Option<&str>, buckets: &[String]) -> Option<String> {
    previous
        .filter(|prev| buckets.iter().any(|bucket| bucket == prev))
        .map(str::to_string)
        .or_else(|| buckets.first().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(bucket: &str, ticker: &str, n: u64) -> ActivityRecord {
        ActivityRecord {
            bucket_start: bucket.to_string(),
            ticker: ticker.to_string(),
            n_senators: n,
            n_trades: None,
            total_estimate: None,
        }
    }

    fn month(start: &str, buy: Option<u64>, sell: Option<u64>) -> MonthlyRecord {
        MonthlyRecord {
            month_start: start.to_string(),
            buy_senators: buy,
            sell_senators: sell,
        }
    }

    #[test]
    fn mode_selects_series() {
        let rows = [month("2024-01-01", Some(2), Some(1)), month("2024-02-01", None, Some(3))];

        let both = timeseries_chart("AAPL", &rows, SeriesMode::Both);
        assert_eq!(both.kind, ChartKind::Line);
        assert_eq!(both.labels, ["2024-01-01", "2024-02-01"]);
        assert_eq!(both.datasets.len(), 2);
        assert_eq!(both.datasets[0].label, BUY_SERIES_LABEL);
        assert_eq!(both.datasets[0].values, [2, 0]);

        let sell = timeseries_chart("AAPL", &rows, SeriesMode::Sell);
        assert_eq!(sell.datasets.len(), 1);
        assert_eq!(sell.datasets[0].label, SELL_SERIES_LABEL);
        assert_eq!(sell.datasets[0].values, [1, 3]);

        let buy = timeseries_chart("AAPL", &rows, SeriesMode::Buy);
        assert_eq!(buy.datasets.len(), 1);
        assert_eq!(buy.datasets[0].label, BUY_SERIES_LABEL);
    }

    #[test]
    fn top_tickers_filters_by_bucket() {
        let rows = [
            activity("2024-02-05", "NVDA", 4),
            activity("2024-02-05", "AAPL", 2),
            activity("2024-01-29", "MSFT", 5),
        ];
        let chart = top_tickers_chart(&rows, "2024-02-05");
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.labels, ["NVDA", "AAPL"]);
        assert_eq!(chart.datasets[0].values, [4, 2]);
        assert_eq!(chart.max_value(), 4);
    }

    #[test]
    fn buckets_are_deduplicated_in_order() {
        let rows = [
            activity("2024-02-05", "NVDA", 4),
            activity("2024-01-29", "MSFT", 5),
            activity("2024-02-05", "AAPL", 2),
        ];
        assert_eq!(distinct_buckets(&rows), ["2024-02-05", "2024-01-29"]);
    }

    #[test]
    fn bucket_choice_keeps_previous_when_present() {
        let buckets = vec!["2024-02-05".to_string(), "2024-01-29".to_string()];
        assert_eq!(choose_bucket(Some("2024-01-29"), &buckets).as_deref(), Some("2024-01-29"));
        assert_eq!(choose_bucket(Some("2023-12-25"), &buckets).as_deref(), Some("2024-02-05"));
        assert_eq!(choose_bucket(None, &[]), None);
    }

    #[test]
    fn rerender_leaves_a_single_chart() {
        let rows = [activity("2024-02-05", "NVDA", 4)];
        let mut slot = ChartSlot::default();
        slot.replace(top_tickers_chart(&rows, "2024-02-05"));
        slot.replace(top_tickers_chart(&rows, "2024-02-05"));
        assert_eq!(slot.instance_count(), 1);
    }

    #[test]
    fn axis_labels_cover_the_range() {
        let rows = [
            month("2024-01-01", Some(4), None),
            month("2024-02-01", Some(7), None),
            month("2024-03-01", Some(1), None),
        ];
        let chart = timeseries_chart("AAPL", &rows, SeriesMode::Buy);
        assert_eq!(chart.x_axis_labels(), ["2024-01-01", "2024-02-01", "2024-03-01"]);
        assert_eq!(chart.y_axis_labels(), ["0", "4", "7"]);

        let single = timeseries_chart("AAPL", &rows[..1], SeriesMode::Buy);
        assert_eq!(single.x_axis_labels(), ["2024-01-01"]);
    }
}
