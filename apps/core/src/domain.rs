use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub const ALL: [Self; 2] = [Self::Buy, Self::Sell];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
        }
    }
}

/// Which series the monthly chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesMode {
    Buy,
    Sell,
    #[default]
    Both,
}

impl SeriesMode {
    pub const ALL: [Self; 3] = [Self::Both, Self::Buy, Self::Sell];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Both => "both",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Buy => "Buy only",
            Self::Sell => "Sell only",
            Self::Both => "Buy + Sell",
        }
    }

    /// The `side` filter matching this mode when listing transactions.
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Buy => Some(Side::Buy),
            Self::Sell => Some(Side::Sell),
            Self::Both => None,
        }
    }

    pub const fn includes_buy(self) -> bool {
        matches!(self, Self::Buy | Self::Both)
    }

    pub const fn includes_sell(self) -> bool {
        matches!(self, Self::Sell | Self::Both)
    }
}

/// Bucket width for the top-tickers aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Self; 3] = [Self::Week, Self::Month, Self::Year];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Week => "Weekly",
            Self::Month => "Monthly",
            Self::Year => "Yearly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    TxDate,
    TxEstimate,
    Ticker,
    FullName,
    Side,
}

impl SortField {
    pub const ALL: [Self; 5] = [
        Self::TxDate,
        Self::TxEstimate,
        Self::Ticker,
        Self::FullName,
        Self::Side,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TxDate => "tx_date",
            Self::TxEstimate => "tx_estimate",
            Self::Ticker => "ticker",
            Self::FullName => "full_name",
            Self::Side => "side",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "tx_date" => Some(Self::TxDate),
            "tx_estimate" => Some(Self::TxEstimate),
            "ticker" => Some(Self::Ticker),
            "full_name" => Some(Self::FullName),
            "side" => Some(Self::Side),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TxDate => "Date",
            Self::TxEstimate => "Estimate",
            Self::Ticker => "Ticker",
            Self::FullName => "Senator",
            Self::Side => "Side",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Steps `current` by `delta` positions through `values`, wrapping at both ends.
/// Falls back to the first value when `current` is not in the list.
pub fn cycle<T: Copy + PartialEq>(values: &[T], current: T, delta: isize) -> T {
    let Some(first) = values.first().copied() else {
        return current;
    };
    let Some(index) = values.iter().position(|value| *value == current) else {
        return first;
    };
    let len = values.len();
    let step = isize::try_from(len)
        .map(|signed_len| delta.rem_euclid(signed_len))
        .and_then(usize::try_from)
        .unwrap_or(0);
    values[(index + step) % len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parse_is_case_insensitive() {
        assert_eq!(Side::parse(" buy "), Some(Side::Buy));
        assert_eq!(Side::parse("SELL"), Some(Side::Sell));
        assert_eq!(Side::parse("hold"), None);
    }

    #[test]
    fn series_mode_maps_to_transaction_side() {
        assert_eq!(SeriesMode::Buy.side(), Some(Side::Buy));
        assert_eq!(SeriesMode::Sell.side(), Some(Side::Sell));
        assert_eq!(SeriesMode::Both.side(), None);
        assert!(SeriesMode::Both.includes_buy() && SeriesMode::Both.includes_sell());
        assert!(!SeriesMode::Buy.includes_sell());
    }

    #[test]
    fn cycle_wraps_in_both_directions() {
        assert_eq!(cycle(&Period::ALL, Period::Year, 1), Period::Week);
        assert_eq!(cycle(&Period::ALL, Period::Week, -1), Period::Year);
        assert_eq!(SortField::Side.next(), SortField::TxDate);
    }

    #[test]
    fn wire_names_round_trip() {
        for field in SortField::ALL {
            assert_eq!(SortField::parse(field.as_str()), Some(field));
        }
        for period in Period::ALL {
            assert_eq!(Period::parse(period.as_str()), Some(period));
        }
    }
}
