use serde::{Deserialize, Serialize};

use crate::domain::Side;

/// Row of `GET /senators`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenatorRecord {
    pub full_name: String,
}

/// Row of `GET /tickers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRecord {
    pub ticker: String,
}

/// Represents one disclosed trade as returned by `GET /transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub tx_date: String,
    #[serde(default)]
    pub tx_estimate: Option<f64>,
}

impl TransactionRecord {
    pub fn side(&self) -> Option<Side> {
        Side::parse(&self.side)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCount {
    pub total: u64,
}

/// Top-ticker aggregate for one time bucket (`GET /activity/top`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub bucket_start: String,
    pub ticker: String,
    pub n_senators: u64,
    #[serde(default)]
    pub n_trades: Option<u64>,
    #[serde(default)]
    pub total_estimate: Option<f64>,
}

/// Unique senators trading one ticker in a month (`GET /timeseries/monthly`).
/// The backend drops the series the requested mode does not need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month_start: String,
    #[serde(default)]
    pub buy_senators: Option<u64>,
    #[serde(default)]
    pub sell_senators: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_tolerates_missing_fields() -> Result<(), serde_json::Error> {
        let record: TransactionRecord =
            serde_json::from_str(r#"{"ticker":"MSFT","side":"SELL","extra":1}"#)?;
        assert_eq!(record.full_name, "");
        assert_eq!(record.tx_estimate, None);
        assert_eq!(record.side(), Some(Side::Sell));
        Ok(())
    }

    #[test]
    fn monthly_record_without_sell_series() -> Result<(), serde_json::Error> {
        let record: MonthlyRecord =
            serde_json::from_str(r#"{"month_start":"2024-03-01","buy_senators":4}"#)?;
        assert_eq!(record.buy_senators, Some(4));
        assert_eq!(record.sell_senators, None);
        Ok(())
    }
}
