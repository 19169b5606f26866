use crate::domain::Side;
use crate::models::TransactionRecord;

pub const NO_RESULTS_MESSAGE: &str = "No results for the selected filters.";

/// Colour role of a badge; front-ends map it to their palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
    Secondary,
    Primary,
    Muted,
}

impl Tone {
    /// Shared palette for both front-ends.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Success => (25, 170, 84),
            Self::Danger => (220, 53, 69),
            Self::Secondary => (150, 158, 166),
            Self::Primary => (13, 110, 253),
            Self::Muted => (90, 98, 104),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    /// Anything that is not a buy is shown as a sell.
    pub fn for_side(side: Option<Side>) -> Self {
        match side {
            Some(Side::Buy) => Self::new("BUY", Tone::Success),
            _ => Self::new("SELL", Tone::Danger),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub full_name: String,
    pub ticker: Badge,
    pub side: Badge,
    pub tx_date: String,
    pub estimate: String,
}

impl From<&TransactionRecord> for TransactionRow {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            full_name: record.full_name.clone(),
            ticker: Badge::new(record.ticker.clone(), Tone::Secondary),
            side: Badge::for_side(record.side()),
            tx_date: record.tx_date.clone(),
            estimate: format_estimate(record.tx_estimate),
        }
    }
}

/// Integral amounts print without a fraction; missing amounts print nothing.
pub fn format_estimate(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
        Some(v) => v.to_string(),
    }
}

pub const TABLE_HEADERS: [&str; 5] = ["Senator", "Ticker", "Side", "Date", "Estimate"];

/// Column widths matching `TABLE_HEADERS`. The name column treats its width as
/// a minimum and takes any slack.
pub const COLUMN_WIDTHS: [u16; 5] = [18, 8, 5, 11, 12];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionTable {
    rows: Vec<TransactionRow>,
    scroll: usize,
}

impl TransactionTable {
    /// Drops every existing row and rebuilds from `records`, keeping their order.
    pub fn replace(&mut self, records: &[TransactionRecord]) {
        self.rows = records.iter().map(TransactionRow::from).collect();
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.scroll = 0;
    }

    pub fn rows(&self) -> &[TransactionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.rows.len() {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// `title` with the visible window, e.g. `Trades (1-20 of 57)`.
    pub fn caption(&self, title: &str, max_rows: usize) -> String {
        if self.rows.is_empty() {
            return format!("{title} (0)");
        }
        let first = self.scroll + 1;
        let last = (self.scroll + max_rows).min(self.rows.len()).max(first);
        format!("{title} ({first}-{last} of {})", self.rows.len())
    }

    /// Rows from the scroll position, at most `max_rows` of them.
    pub fn visible(&self, max_rows: usize) -> impl Iterator<Item = &TransactionRow> {
        self.rows.iter().skip(self.scroll).take(max_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, ticker: &str, side: &str, estimate: Option<f64>) -> TransactionRecord {
        TransactionRecord {
            full_name: name.to_string(),
            ticker: ticker.to_string(),
            side: side.to_string(),
            tx_date: "2024-01-01".to_string(),
            tx_estimate: estimate,
        }
    }

    #[test]
    fn replace_preserves_order_and_discards_old_rows() {
        let mut table = TransactionTable::default();
        table.replace(&[record("Old", "OLD", "BUY", None)]);
        table.replace(&[
            record("B", "MSFT", "SELL", Some(15_000.0)),
            record("A", "AAPL", "BUY", Some(1_000.0)),
        ]);

        let names: Vec<&str> = table.rows().iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn empty_input_empties_the_table() {
        let mut table = TransactionTable::default();
        table.replace(&[record("A", "AAPL", "BUY", None)]);
        table.replace(&[]);
        assert!(table.is_empty());
    }

    #[test]
    fn side_badges_follow_side() {
        assert_eq!(Badge::for_side(Some(Side::Buy)), Badge::new("BUY", Tone::Success));
        assert_eq!(Badge::for_side(Some(Side::Sell)), Badge::new("SELL", Tone::Danger));
        assert_eq!(Badge::for_side(None).tone, Tone::Danger);
    }

    #[test]
    fn markup_is_kept_as_text() {
        let row = TransactionRow::from(&record("<b>x</b>", "<img>", "BUY", None));
        assert_eq!(row.full_name, "<b>x</b>");
        assert_eq!(row.ticker.text, "<img>");
    }

    #[test]
    fn estimates_print_like_the_api_returns_them() {
        assert_eq!(format_estimate(Some(1000.0)), "1000");
        assert_eq!(format_estimate(Some(1500.5)), "1500.5");
        assert_eq!(format_estimate(None), "");
    }

    #[test]
    fn scrolling_stays_within_rows() {
        let mut table = TransactionTable::default();
        table.replace(&[record("A", "A", "BUY", None), record("B", "B", "BUY", None)]);
        table.scroll_up();
        assert_eq!(table.scroll(), 0);
        table.scroll_down();
        table.scroll_down();
        assert_eq!(table.scroll(), 1);
        assert_eq!(table.visible(10).count(), 1);
    }

    #[test]
    fn caption_tracks_scroll_window() {
        let mut table = TransactionTable::default();
        assert_eq!(table.caption("Trades", 10), "Trades (0)");

        let records: Vec<_> = (0..25).map(|_| record("Jane Doe", "AAPL", "BUY", None)).collect();
        table.replace(&records);
        assert_eq!(table.caption("Trades", 10), "Trades (1-10 of 25)");
        table.scroll_down();
        table.scroll_down();
        assert_eq!(table.caption("Trades", 30), "Trades (3-25 of 25)");
    }
}
