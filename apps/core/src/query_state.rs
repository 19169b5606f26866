//! Mirrors filter state to and from the page query string.
//!
//! The query string is the shareable form of the current filters. Reading it
//! fills the filter structs; writing it back touches only the keys a page
//! owns, so unrelated parameters survive.

use chrono::NaiveDate;
use url::form_urlencoded;

use crate::domain::{SeriesMode, Side, SortField, SortOrder};
use crate::request::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn get(&self, key: &str, fallback: &str) -> String {
        self.get_raw(key).unwrap_or(fallback).to_string()
    }

    /// Replaces the first value for `key` and drops any repeats.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(index) = self.pairs.iter().position(|(k, _)| k == key) {
            self.pairs[index].1 = value;
            let mut seen = false;
            self.pairs.retain(|(k, _)| {
                if k != key {
                    return true;
                }
                let keep = !seen;
                seen = true;
                keep
            });
        } else {
            self.pairs.push((key.to_string(), value));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Sets `key` when `value` is non-empty, otherwise removes it.
    pub fn set_or_remove(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.remove(key);
        } else {
            self.set(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// `pathname?query`, or the bare pathname when there is nothing to add.
pub fn location_with_query(pathname: &str, query: &str) -> String {
    if query.is_empty() {
        pathname.to_string()
    } else {
        format!("{pathname}?{query}")
    }
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
}

/// Filters of the transactions (index) page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFilters {
    pub senator: String,
    pub side: Option<Side>,
    pub ticker: String,
    pub limit: u32,
    pub offset: u64,
    pub sort: SortField,
    pub order: SortOrder,
    /// Optional window for the top-tickers aggregation.
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Default for IndexFilters {
    fn default() -> Self {
        Self {
            senator: String::new(),
            side: None,
            ticker: String::new(),
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            sort: SortField::default(),
            order: SortOrder::default(),
            start: None,
            end: None,
        }
    }
}

impl IndexFilters {
    pub fn from_query(params: &QueryParams) -> Self {
        let mut filters = Self::default();
        filters.apply_query(params);
        filters
    }

    /// Unparseable or out-of-range paging values leave the current ones alone.
    pub fn apply_query(&mut self, params: &QueryParams) {
        self.senator = params.get("senator", "");
        self.side = Side::parse(&params.get("side", ""));
        self.ticker = params.get("ticker", "");

        if let Some(limit) = params
            .get_raw("limit")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|limit| (1..=MAX_PAGE_SIZE).contains(limit))
        {
            self.limit = limit;
        }
        if let Some(offset) = params
            .get_raw("offset")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
        {
            self.offset = offset;
        }

        self.sort = params
            .get_raw("sort")
            .and_then(SortField::parse)
            .unwrap_or_default();
        self.order = params
            .get_raw("order")
            .and_then(SortOrder::parse)
            .unwrap_or_default();
        self.start = parse_date(params.get_raw("start"));
        self.end = parse_date(params.get_raw("end"));
    }

    pub fn write_query(&self, params: &mut QueryParams) {
        params.set_or_remove("senator", &self.senator);
        params.set_or_remove("side", self.side.map(Side::as_str).unwrap_or_default());
        params.set_or_remove("ticker", &self.ticker);

        params.set("limit", self.limit.to_string());
        params.set("offset", self.offset.to_string());

        if self.sort == SortField::default() {
            params.remove("sort");
        } else {
            params.set("sort", self.sort.as_str());
        }
        if self.order == SortOrder::default() {
            params.remove("order");
        } else {
            params.set("order", self.order.as_str());
        }

        let format = |date: Option<NaiveDate>| {
            date.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        params.set_or_remove("start", &format(self.start));
        params.set_or_remove("end", &format(self.end));
    }

    /// Rewrites `existing` with these filters, keeping unrelated parameters.
    pub fn sync_query(&self, existing: &str) -> String {
        let mut params = QueryParams::parse(existing);
        self.write_query(&mut params);
        params.to_query_string()
    }
}

/// Filters of the monthly time-series page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeseriesFilters {
    pub ticker: String,
    pub mode: SeriesMode,
}

impl TimeseriesFilters {
    pub fn from_query(params: &QueryParams) -> Self {
        let mut filters = Self::default();
        filters.apply_query(params);
        filters
    }

    pub fn apply_query(&mut self, params: &QueryParams) {
        self.ticker = params.get("ticker", "");
        self.mode = SeriesMode::parse(&params.get("mode", "both")).unwrap_or_default();
    }

    pub fn write_query(&self, params: &mut QueryParams) {
        params.set_or_remove("ticker", &self.ticker);
        params.set("mode", self.mode.as_str());
    }

    pub fn sync_query(&self, existing: &str) -> String {
        let mut params = QueryParams::parse(existing);
        self.write_query(&mut params);
        params.to_query_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn param_set(query: &str) -> BTreeSet<(String, String)> {
        QueryParams::parse(query).pairs().iter().cloned().collect()
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let filters = IndexFilters::from_query(&QueryParams::parse(""));
        assert_eq!(filters, IndexFilters::default());

        let series = TimeseriesFilters::from_query(&QueryParams::parse("?"));
        assert_eq!(series.ticker, "");
        assert_eq!(series.mode, SeriesMode::Both);
    }

    #[test]
    fn index_round_trip_preserves_parameter_set() {
        let queries = [
            "limit=50&offset=0",
            "senator=Jane+Doe&side=BUY&ticker=AAPL&limit=50&offset=100",
            "offset=50&limit=25&side=SELL",
            "ticker=BRK.B&limit=50&offset=0&sort=ticker&order=asc",
            "limit=50&offset=0&start=2024-01-01&end=2024-06-30",
        ];
        for query in queries {
            let filters = IndexFilters::from_query(&QueryParams::parse(query));
            let rewritten = filters.sync_query("");
            assert_eq!(param_set(&rewritten), param_set(query), "{query} -> {rewritten}");
        }
    }

    #[test]
    fn timeseries_round_trip_preserves_parameter_set() {
        for query in ["ticker=AAPL&mode=buy", "mode=both", "mode=sell&ticker=NVDA"] {
            let filters = TimeseriesFilters::from_query(&QueryParams::parse(query));
            assert_eq!(param_set(&filters.sync_query("")), param_set(query));
        }
    }

    #[test]
    fn invalid_paging_keeps_in_memory_values() {
        let mut filters = IndexFilters {
            offset: 150,
            limit: 50,
            ..IndexFilters::default()
        };
        filters.apply_query(&QueryParams::parse("offset=-50&limit=abc"));
        assert_eq!(filters.offset, 150);
        assert_eq!(filters.limit, 50);

        filters.apply_query(&QueryParams::parse("offset=abc&limit=0"));
        assert_eq!(filters.offset, 150);
        assert_eq!(filters.limit, 50);

        filters.apply_query(&QueryParams::parse("offset=200&limit=20"));
        assert_eq!(filters.offset, 200);
        assert_eq!(filters.limit, 20);
    }

    #[test]
    fn empty_filters_are_removed_and_paging_always_written() {
        let filters = IndexFilters::default();
        let query = filters.sync_query("?senator=Old+Name&side=SELL&utm_source=mail");
        assert_eq!(param_set(&query), param_set("utm_source=mail&limit=50&offset=0"));
    }

    #[test]
    fn unknown_mode_falls_back_to_both() {
        let filters = TimeseriesFilters::from_query(&QueryParams::parse("ticker=AAPL&mode=hold"));
        assert_eq!(filters.mode, SeriesMode::Both);
        assert_eq!(filters.sync_query(""), "ticker=AAPL&mode=both");
    }

    #[test]
    fn invalid_dates_are_dropped() {
        let filters = IndexFilters::from_query(&QueryParams::parse("start=2024-13-01&end=yesterday"));
        assert_eq!(filters.start, None);
        assert_eq!(filters.end, None);
    }

    #[test]
    fn set_collapses_repeated_keys() {
        let mut params = QueryParams::parse("side=BUY&x=1&side=SELL");
        params.set("side", "SELL");
        assert_eq!(params.to_query_string(), "side=SELL&x=1");
    }

    #[test]
    fn location_omits_empty_query() {
        assert_eq!(location_with_query("/index.html", ""), "/index.html");
        assert_eq!(location_with_query("/", "mode=both"), "/?mode=both");
    }
}
