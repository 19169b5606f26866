//! Typed request builder for the dashboard's REST endpoints.
//!
//! Every query struct knows its path and its parameters; [`ApiBase::url`]
//! turns one into a request URL, dropping empty filters and form-encoding the
//! rest.

use chrono::NaiveDate;
use url::{form_urlencoded, Url};

use crate::domain::{Period, SeriesMode, Side, SortField, SortOrder};
use crate::error::ApiError;

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 200;
pub const DEFAULT_TOP_N: u32 = 10;
/// Rows shown under the monthly chart.
pub const TICKER_TABLE_LIMIT: u32 = 200;

pub trait Endpoint {
    fn path(&self) -> &'static str;

    /// Parameters in the order they are written. Empty values are skipped.
    fn params(&self) -> Vec<(&'static str, String)>;
}

/// Where the REST API lives: an absolute `http(s)` URL, a root-relative path,
/// or empty for the page's own origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiBase(String);

impl ApiBase {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let trimmed = raw.trim().trim_end_matches('/');

        if trimmed.is_empty() || trimmed.starts_with('/') {
            return Ok(Self(trimmed.to_string()));
        }

        let parsed = Url::parse(trimmed).map_err(|e| ApiError::InvalidBase(format!("{raw}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ApiError::InvalidBase(format!(
                "{raw}: expected an http(s) URL or a path starting with '/'"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn url(&self, endpoint: &impl Endpoint) -> String {
        let query = encode_params(endpoint.params());
        if query.is_empty() {
            format!("{}{}", self.0, endpoint.path())
        } else {
            format!("{}{}?{query}", self.0, endpoint.path())
        }
    }
}

fn encode_params(params: Vec<(&'static str, String)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        if value.trim().is_empty() {
            continue;
        }
        serializer.append_pair(key, &value);
    }
    serializer.finish()
}

/// Tickers are matched upper-case by the backend.
pub fn normalize_ticker(value: &str) -> String {
    value.trim().to_uppercase()
}

fn optional(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SenatorsQuery {
    pub limit: Option<u32>,
}

impl Endpoint for SenatorsQuery {
    fn path(&self) -> &'static str {
        "/senators"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![("limit", self.limit.map(|l| l.to_string()).unwrap_or_default())]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickersQuery {
    pub limit: Option<u32>,
}

impl Endpoint for TickersQuery {
    fn path(&self) -> &'static str {
        "/tickers"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![("limit", self.limit.map(|l| l.to_string()).unwrap_or_default())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub senator: Option<String>,
    pub side: Option<Side>,
    pub ticker: Option<String>,
    pub limit: u32,
    pub offset: u64,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            senator: None,
            side: None,
            ticker: None,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            sort: None,
            order: None,
        }
    }
}

impl Endpoint for TransactionQuery {
    fn path(&self) -> &'static str {
        "/transactions"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("senator", optional(self.senator.as_deref())),
            ("side", optional(self.side.map(Side::as_str))),
            (
                "ticker",
                self.ticker.as_deref().map(normalize_ticker).unwrap_or_default(),
            ),
            ("sort", optional(self.sort.map(SortField::as_str))),
            ("order", optional(self.order.map(SortOrder::as_str))),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionCountQuery {
    pub senator: Option<String>,
    pub side: Option<Side>,
    pub ticker: Option<String>,
}

impl Endpoint for TransactionCountQuery {
    fn path(&self) -> &'static str {
        "/transactions/count"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("senator", optional(self.senator.as_deref())),
            ("side", optional(self.side.map(Side::as_str))),
            (
                "ticker",
                self.ticker.as_deref().map(normalize_ticker).unwrap_or_default(),
            ),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityQuery {
    pub period: Period,
    pub side: Side,
    pub top_n: u32,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            period: Period::Week,
            side: Side::Buy,
            top_n: DEFAULT_TOP_N,
            start: None,
            end: None,
        }
    }
}

impl Endpoint for ActivityQuery {
    fn path(&self) -> &'static str {
        "/activity/top"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("period", self.period.as_str().to_string()),
            ("side", self.side.as_str().to_string()),
            ("top_n", self.top_n.to_string()),
            ("start", format_date(self.start)),
            ("end", format_date(self.end)),
        ]
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeseriesQuery {
    pub ticker: String,
    pub mode: SeriesMode,
}

impl Endpoint for TimeseriesQuery {
    fn path(&self) -> &'static str {
        "/timeseries/monthly"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ticker", normalize_ticker(&self.ticker)),
            ("mode", self.mode.as_str().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ApiBase {
        ApiBase::parse("https://api.example.com/").unwrap_or_default()
    }

    #[test]
    fn transactions_url_includes_only_present_filters() {
        let query = TransactionQuery {
            side: Some(Side::Buy),
            ..TransactionQuery::default()
        };
        assert_eq!(
            base().url(&query),
            "https://api.example.com/transactions?limit=50&offset=0&side=BUY"
        );
    }

    #[test]
    fn empty_strings_are_omitted() {
        let query = TransactionQuery {
            senator: Some(String::new()),
            ticker: Some("   ".to_string()),
            ..TransactionQuery::default()
        };
        let url = base().url(&query);
        assert!(!url.contains("senator"));
        assert!(!url.contains("ticker"));
    }

    #[test]
    fn every_filter_combination_matches_its_parameters() {
        let senators = [None, Some(String::new()), Some("Jane Doe".to_string())];
        let sides = [None, Some(Side::Buy), Some(Side::Sell)];
        let tickers = [None, Some(String::new()), Some("brk.b".to_string())];

        for senator in &senators {
            for side in sides {
                for ticker in &tickers {
                    let query = TransactionQuery {
                        senator: senator.clone(),
                        side,
                        ticker: ticker.clone(),
                        ..TransactionQuery::default()
                    };
                    let url = base().url(&query);
                    let (_, qs) = url.split_once('?').unwrap_or_default();
                    let keys: Vec<String> = form_urlencoded::parse(qs.as_bytes())
                        .map(|(k, _)| k.into_owned())
                        .collect();

                    let wants_senator = senator.as_deref().is_some_and(|s| !s.is_empty());
                    let wants_ticker = ticker.as_deref().is_some_and(|t| !t.is_empty());
                    assert_eq!(keys.contains(&"senator".to_string()), wants_senator, "{url}");
                    assert_eq!(keys.contains(&"side".to_string()), side.is_some(), "{url}");
                    assert_eq!(keys.contains(&"ticker".to_string()), wants_ticker, "{url}");
                    assert!(keys.contains(&"limit".to_string()));
                    assert!(keys.contains(&"offset".to_string()));
                }
            }
        }
    }

    #[test]
    fn values_are_encoded_and_tickers_uppercased() {
        let query = TransactionQuery {
            senator: Some("Jane O'Doe & Co".to_string()),
            ticker: Some(" brk.b ".to_string()),
            ..TransactionQuery::default()
        };
        let url = base().url(&query);
        assert!(url.contains("senator=Jane+O%27Doe+%26+Co"), "{url}");
        assert!(url.contains("ticker=BRK.B"), "{url}");
    }

    #[test]
    fn activity_query_serialises_window() {
        let query = ActivityQuery {
            period: Period::Month,
            side: Side::Sell,
            start: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..ActivityQuery::default()
        };
        assert_eq!(
            base().url(&query),
            "https://api.example.com/activity/top?period=month&side=SELL&top_n=10&start=2024-01-01"
        );
    }

    #[test]
    fn timeseries_query_url() {
        let query = TimeseriesQuery {
            ticker: "aapl".to_string(),
            mode: SeriesMode::Both,
        };
        assert_eq!(
            base().url(&query),
            "https://api.example.com/timeseries/monthly?ticker=AAPL&mode=both"
        );
    }

    #[test]
    fn reference_queries_without_limit_have_no_query_string() {
        let same_origin = ApiBase::default();
        assert_eq!(same_origin.url(&SenatorsQuery::default()), "/senators");
        assert_eq!(
            same_origin.url(&TickersQuery { limit: Some(5000) }),
            "/tickers?limit=5000"
        );
    }

    #[test]
    fn api_base_accepts_paths_and_http_urls_only() {
        assert_eq!(ApiBase::parse("/api/").map(|b| b.url(&SenatorsQuery::default())), Ok("/api/senators".to_string()));
        assert!(ApiBase::parse("http://127.0.0.1:8000").is_ok());
        assert!(ApiBase::parse("").is_ok());
        assert!(matches!(ApiBase::parse("ftp://host"), Err(ApiError::InvalidBase(_))));
        assert!(matches!(ApiBase::parse("api.example.com"), Err(ApiError::InvalidBase(_))));
    }
}
