use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{
    ActivityRecord, MonthlyRecord, SenatorRecord, TickerRecord, TransactionCount,
    TransactionRecord,
};

/// One independent stream of requests. Tokens are tracked per channel so a
/// slow senators response never invalidates a transactions response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Senators,
    Tickers,
    Transactions,
    TransactionCount,
    Activity,
    Timeseries,
}

impl Channel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Senators => "senators",
            Self::Tickers => "tickers",
            Self::Transactions => "transactions",
            Self::TransactionCount => "transaction count",
            Self::Activity => "activity",
            Self::Timeseries => "time series",
        }
    }

    pub fn decode(self, body: &str) -> Result<Payload, ApiError> {
        Ok(match self {
            Self::Senators => Payload::Senators(parse_json(body)?),
            Self::Tickers => Payload::Tickers(parse_json(body)?),
            Self::Transactions => Payload::Transactions(parse_json(body)?),
            Self::TransactionCount => Payload::TransactionCount(parse_json(body)?),
            Self::Activity => Payload::Activity(parse_json(body)?),
            Self::Timeseries => Payload::Timeseries(parse_json(body)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Senators(Vec<SenatorRecord>),
    Tickers(Vec<TickerRecord>),
    Transactions(Vec<TransactionRecord>),
    TransactionCount(TransactionCount),
    Activity(Vec<ActivityRecord>),
    Timeseries(Vec<MonthlyRecord>),
}

impl Payload {
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Senators(_) => Channel::Senators,
            Self::Tickers(_) => Channel::Tickers,
            Self::Transactions(_) => Channel::Transactions,
            Self::TransactionCount(_) => Channel::TransactionCount,
            Self::Activity(_) => Channel::Activity,
            Self::Timeseries(_) => Channel::Timeseries,
        }
    }
}

macro_rules! payload_accessor {
    ($name:ident, $variant:ident, $ty:ty) => {
        pub fn $name(self) -> Result<$ty, ApiError> {
            match self {
                Self::$variant(value) => Ok(value),
                other => Err(ApiError::InvalidResponse(format!(
                    "expected {} payload, got {}",
                    Channel::$variant.label(),
                    other.channel().label()
                ))),
            }
        }
    };
}

impl Payload {
    payload_accessor!(into_senators, Senators, Vec<SenatorRecord>);
    payload_accessor!(into_tickers, Tickers, Vec<TickerRecord>);
    payload_accessor!(into_transactions, Transactions, Vec<TransactionRecord>);
    payload_accessor!(into_transaction_count, TransactionCount, TransactionCount);
    payload_accessor!(into_activity, Activity, Vec<ActivityRecord>);
    payload_accessor!(into_timeseries, Timeseries, Vec<MonthlyRecord>);
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Turns a completed HTTP exchange into a payload for `channel`.
pub fn decode_response(
    channel: Channel,
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<Payload, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::http(status, status_text, body));
    }
    channel.decode(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_is_an_http_error() {
        let result = decode_response(Channel::Transactions, 500, "Internal Server Error", "boom");
        assert_eq!(
            result,
            Err(ApiError::Http {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                body: "boom".to_string(),
            })
        );
    }

    #[test]
    fn malformed_body_is_invalid_response() {
        let result = decode_response(Channel::Senators, 200, "OK", "<html>oops</html>");
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));

        let wrong_shape = decode_response(Channel::TransactionCount, 200, "OK", "[1,2]");
        assert!(matches!(wrong_shape, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn decodes_each_channel() -> Result<(), ApiError> {
        let tickers = decode_response(Channel::Tickers, 200, "OK", r#"[{"ticker":"AAPL"}]"#)?;
        assert_eq!(tickers.channel(), Channel::Tickers);

        let count = decode_response(Channel::TransactionCount, 200, "OK", r#"{"total":7}"#)?;
        assert_eq!(count, Payload::TransactionCount(TransactionCount { total: 7 }));

        let activity = decode_response(
            Channel::Activity,
            200,
            "OK",
            r#"[{"bucket_start":"2024-01-01","ticker":"NVDA","n_senators":3,"n_trades":5,"total_estimate":15000.0}]"#,
        )?;
        assert_eq!(activity.channel(), Channel::Activity);
        assert!(matches!(
            activity.into_tickers(),
            Err(ApiError::InvalidResponse(_))
        ));
        Ok(())
    }
}
