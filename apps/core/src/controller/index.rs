use crate::chart::{choose_bucket, distinct_buckets, top_tickers_chart, ChartSlot, ChartSpec};
use crate::decode::{Channel, Payload};
use crate::domain::{cycle, Period, Side, SortField, SortOrder};
use crate::error::ApiError;
use crate::models::ActivityRecord;
use crate::query_state::{IndexFilters, QueryParams};
use crate::request::{
    normalize_ticker, ActivityQuery, ApiBase, SenatorsQuery, TickersQuery, TransactionCountQuery,
    TransactionQuery, DEFAULT_TOP_N,
};
use crate::select::{
    senator_options, ticker_options, SelectOptions, TickerPicker, ALL_SENATORS_LABEL,
};
use crate::slot::Slot;
use crate::table::{TransactionTable, NO_RESULTS_MESSAGE};
use crate::tokens::RequestTracker;

use super::{
    accept, issue, report, Command, Effect, Page, PendingRequest, StatusLine,
    NO_ACTIVITY_MESSAGE, NO_BUCKET_MESSAGE,
};

const FILTER_SIDES: [Option<Side>; 3] = [None, Some(Side::Buy), Some(Side::Sell)];

/// Focusable controls of the transactions page, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexControl {
    #[default]
    Senator,
    Side,
    Ticker,
    Period,
    ActivitySide,
    Bucket,
}

impl IndexControl {
    pub const ALL: [Self; 6] = [
        Self::Senator,
        Self::Side,
        Self::Ticker,
        Self::Period,
        Self::ActivitySide,
        Self::Bucket,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Senator => "Senator",
            Self::Side => "Side",
            Self::Ticker => "Ticker",
            Self::Period => "Period",
            Self::ActivitySide => "Aggregate side",
            Self::Bucket => "Bucket",
        }
    }
}

/// Top-tickers aggregation: its own controls, the cached rows and the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityPanel {
    period: Period,
    side: Side,
    rows: Vec<ActivityRecord>,
    buckets: Vec<String>,
    bucket: Option<String>,
    chart: ChartSlot,
}

impl Default for ActivityPanel {
    fn default() -> Self {
        Self {
            period: Period::default(),
            side: Side::Buy,
            rows: Vec::new(),
            buckets: Vec::new(),
            bucket: None,
            chart: ChartSlot::default(),
        }
    }
}

impl ActivityPanel {
    pub const fn period(&self) -> Period {
        self.period
    }

    pub const fn side(&self) -> Side {
        self.side
    }

    pub fn rows(&self) -> &[ActivityRecord] {
        &self.rows
    }

    pub fn buckets(&self) -> &[String] {
        &self.buckets
    }

    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    pub const fn chart(&self) -> Option<&ChartSpec> {
        self.chart.get()
    }

    pub const fn chart_slot(&self) -> &ChartSlot {
        &self.chart
    }

    fn reset(&mut self) {
        self.rows.clear();
        self.buckets.clear();
        self.bucket = None;
        self.chart.clear();
    }

    /// Redraws from cached rows. Returns false when there is no bucket to draw.
    fn render(&mut self) -> bool {
        match &self.bucket {
            Some(bucket) => {
                self.chart.replace(top_tickers_chart(&self.rows, bucket));
                true
            }
            None => {
                self.chart.clear();
                false
            }
        }
    }
}

/// Transactions page: filter controls, the paged table and the top-tickers chart.
#[derive(Debug, Clone, Default)]
pub struct IndexPage {
    filters: IndexFilters,
    senators: SelectOptions,
    tickers: Slot<TickerPicker>,
    table: TransactionTable,
    total: Option<u64>,
    activity: ActivityPanel,
    focus: IndexControl,
    tracker: RequestTracker,
    status: StatusLine,
}

impl IndexPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn filters(&self) -> &IndexFilters {
        &self.filters
    }

    pub const fn senators(&self) -> &SelectOptions {
        &self.senators
    }

    pub fn senator_label(&self) -> &str {
        self.senators
            .label_for(&self.filters.senator)
            .unwrap_or(if self.filters.senator.is_empty() {
                ALL_SENATORS_LABEL
            } else {
                &self.filters.senator
            })
    }

    pub const fn side_label(&self) -> &'static str {
        match self.filters.side {
            Some(side) => side.label(),
            None => "All Sides",
        }
    }

    /// The ticker search box, once the ticker list has loaded.
    pub const fn ticker_picker(&self) -> Option<&TickerPicker> {
        self.tickers.get()
    }

    pub const fn table(&self) -> &TransactionTable {
        &self.table
    }

    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    pub const fn activity(&self) -> &ActivityPanel {
        &self.activity
    }

    pub const fn focus(&self) -> IndexControl {
        self.focus
    }

    pub fn page_info(&self) -> String {
        let mut info = format!(
            "Showing {} rows per page. Offset: {}",
            self.filters.limit, self.filters.offset
        );
        if let Some(total) = self.total {
            info.push_str(&format!(" of {total}"));
        }
        info
    }

    /// Offset of the following page, `None` once the offset cannot grow.
    fn next_offset(&self) -> Option<u64> {
        self.filters.offset.checked_add(u64::from(self.filters.limit))
    }

    pub fn has_next_page(&self) -> bool {
        self.next_offset()
            .is_some_and(|next| self.total.map_or(true, |total| next < total))
    }

    pub const fn has_prev_page(&self) -> bool {
        self.filters.offset > 0
    }

    /// Filters that narrow the row set changed: back to the first page.
    fn filters_changed(&mut self) -> Vec<Effect> {
        self.filters.offset = 0;
        self.total = None;
        vec![
            Effect::SyncUrl,
            Effect::LoadTransactions,
            Effect::LoadTransactionCount,
        ]
    }

    fn set_ticker(&mut self, ticker: String) -> Vec<Effect> {
        if ticker == self.filters.ticker {
            return Vec::new();
        }
        self.filters.ticker = ticker;
        self.filters_changed()
    }

    fn step_option(&mut self, delta: isize) -> Vec<Effect> {
        match self.focus {
            IndexControl::Senator => {
                match self.senators.cycle(&self.filters.senator, delta) {
                    Some(next) if next != self.filters.senator => {
                        self.filters.senator = next;
                        self.filters_changed()
                    }
                    _ => Vec::new(),
                }
            }
            IndexControl::Side => {
                self.filters.side = cycle(&FILTER_SIDES, self.filters.side, delta);
                self.filters_changed()
            }
            IndexControl::Ticker => {
                let Some(picker) = self.tickers.get_mut() else {
                    return Vec::new();
                };
                if picker.is_searching() {
                    picker.move_highlight(delta);
                    return Vec::new();
                }
                let next = picker.options().cycle(picker.value(), delta);
                match next {
                    Some(next) if picker.set_value(&next) => self.set_ticker(next),
                    _ => Vec::new(),
                }
            }
            IndexControl::Period => {
                self.activity.period = cycle(&Period::ALL, self.activity.period, delta);
                vec![Effect::LoadActivity]
            }
            IndexControl::ActivitySide => {
                self.activity.side = cycle(&Side::ALL, self.activity.side, delta);
                vec![Effect::LoadActivity]
            }
            IndexControl::Bucket => {
                let buckets = &self.activity.buckets;
                let current = self
                    .activity
                    .bucket
                    .as_ref()
                    .and_then(|bucket| buckets.iter().position(|b| b == bucket));
                if let Some(index) = current {
                    let positions: Vec<usize> = (0..buckets.len()).collect();
                    self.activity.bucket = Some(buckets[cycle(&positions, index, delta)].clone());
                }
                self.render_activity();
                Vec::new()
            }
        }
    }

    fn clear_focused(&mut self) -> Vec<Effect> {
        match self.focus {
            IndexControl::Senator if !self.filters.senator.is_empty() => {
                self.filters.senator.clear();
                self.filters_changed()
            }
            IndexControl::Side if self.filters.side.is_some() => {
                self.filters.side = None;
                self.filters_changed()
            }
            IndexControl::Ticker => {
                if let Some(picker) = self.tickers.get_mut().filter(|p| p.is_searching()) {
                    picker.cancel_search();
                    return Vec::new();
                }
                let changed = self.tickers.get_mut().is_some_and(TickerPicker::clear);
                if changed || !self.filters.ticker.is_empty() {
                    self.set_ticker(String::new())
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn render_activity(&mut self) {
        if !self.activity.render() {
            self.status.set(NO_BUCKET_MESSAGE);
        }
    }

    fn apply_senators(&mut self, result: Result<Payload, ApiError>) -> Vec<Effect> {
        match result.and_then(Payload::into_senators) {
            Ok(records) => {
                self.senators = senator_options(&records);
                let senator = &self.filters.senator;
                if senator.is_empty() || self.senators.contains(senator) {
                    return Vec::new();
                }
                tracing::debug!(%senator, "senator from the URL is not offered, clearing it");
                self.filters.senator.clear();
                self.filters_changed()
            }
            Err(error) => {
                report(&mut self.status, "Error loading senators", &error);
                Vec::new()
            }
        }
    }

    fn apply_tickers(&mut self, result: Result<Payload, ApiError>) -> Vec<Effect> {
        match result.and_then(Payload::into_tickers) {
            Ok(records) => {
                let wanted = normalize_ticker(&self.filters.ticker);
                let picker = TickerPicker::new(ticker_options(&records, true), &wanted);
                let selected = picker.value().to_string();
                self.tickers.replace(picker);

                if selected == self.filters.ticker {
                    Vec::new()
                } else if selected == wanted {
                    self.filters.ticker = selected;
                    vec![Effect::SyncUrl]
                } else {
                    tracing::debug!(ticker = %wanted, "ticker from the URL is not offered, clearing it");
                    self.set_ticker(selected)
                }
            }
            Err(error) => {
                report(&mut self.status, "Error loading tickers", &error);
                Vec::new()
            }
        }
    }

    fn apply_transactions(&mut self, result: Result<Payload, ApiError>) {
        match result.and_then(Payload::into_transactions) {
            Ok(records) => {
                self.table.replace(&records);
                if records.is_empty() {
                    self.status.set(NO_RESULTS_MESSAGE);
                }
            }
            Err(error) => report(&mut self.status, "Error loading transactions", &error),
        }
    }

    fn apply_count(&mut self, result: Result<Payload, ApiError>) {
        match result.and_then(Payload::into_transaction_count) {
            Ok(count) => self.total = Some(count.total),
            Err(error) => tracing::warn!(%error, "transaction count unavailable"),
        }
    }

    fn apply_activity(&mut self, result: Result<Payload, ApiError>) {
        match result.and_then(Payload::into_activity) {
            Ok(rows) if rows.is_empty() => {
                self.activity.reset();
                self.status.set(NO_ACTIVITY_MESSAGE);
            }
            Ok(rows) => {
                self.activity.buckets = distinct_buckets(&rows);
                self.activity.bucket =
                    choose_bucket(self.activity.bucket.as_deref(), &self.activity.buckets);
                self.activity.rows = rows;
                self.render_activity();
            }
            Err(error) => report(&mut self.status, "Error loading chart", &error),
        }
    }

    fn transaction_query(&self) -> TransactionQuery {
        let filters = &self.filters;
        TransactionQuery {
            senator: Some(filters.senator.clone()).filter(|s| !s.is_empty()),
            side: filters.side,
            ticker: Some(filters.ticker.clone()).filter(|t| !t.is_empty()),
            limit: filters.limit,
            offset: filters.offset,
            sort: Some(filters.sort).filter(|sort| *sort != SortField::default()),
            order: Some(filters.order).filter(|order| *order != SortOrder::default()),
        }
    }
}

impl Page for IndexPage {
    fn startup(&mut self, query: &str) -> Vec<Effect> {
        self.apply_query(query);
        vec![
            Effect::SyncUrl,
            Effect::LoadSenators,
            Effect::LoadTickers,
            Effect::LoadTransactions,
            Effect::LoadTransactionCount,
            Effect::LoadActivity,
        ]
    }

    fn apply_query(&mut self, query: &str) {
        self.filters.apply_query(&QueryParams::parse(query));
        if let Some(picker) = self.tickers.get_mut() {
            picker.set_value(&self.filters.ticker);
        }
    }

    fn sync_query(&self, existing: &str) -> String {
        self.filters.sync_query(existing)
    }

    fn handle(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::FocusNext => {
                self.focus = cycle(&IndexControl::ALL, self.focus, 1);
                Vec::new()
            }
            Command::FocusPrev => {
                self.focus = cycle(&IndexControl::ALL, self.focus, -1);
                Vec::new()
            }
            Command::OptionNext => self.step_option(1),
            Command::OptionPrev => self.step_option(-1),
            Command::Input(ch) => {
                if let (IndexControl::Ticker, Some(picker)) = (self.focus, self.tickers.get_mut()) {
                    picker.push_char(ch);
                }
                Vec::new()
            }
            Command::Backspace => {
                if let (IndexControl::Ticker, Some(picker)) = (self.focus, self.tickers.get_mut()) {
                    picker.backspace();
                }
                Vec::new()
            }
            Command::Submit => {
                let committed = match (self.focus, self.tickers.get_mut()) {
                    (IndexControl::Ticker, Some(picker)) => picker.commit(),
                    _ => None,
                };
                committed.map_or_else(Vec::new, |ticker| self.set_ticker(ticker))
            }
            Command::Clear => self.clear_focused(),
            Command::NextPage => {
                let Some(next) = self.next_offset().filter(|_| self.has_next_page()) else {
                    return Vec::new();
                };
                self.filters.offset = next;
                vec![Effect::SyncUrl, Effect::LoadTransactions]
            }
            Command::PrevPage => {
                self.filters.offset = self
                    .filters
                    .offset
                    .saturating_sub(u64::from(self.filters.limit));
                vec![Effect::SyncUrl, Effect::LoadTransactions]
            }
            Command::ScrollUp => {
                self.table.scroll_up();
                Vec::new()
            }
            Command::ScrollDown => {
                self.table.scroll_down();
                Vec::new()
            }
            Command::Reload => vec![
                Effect::LoadTransactions,
                Effect::LoadTransactionCount,
                Effect::LoadActivity,
            ],
            Command::CycleSort => {
                self.filters.sort = self.filters.sort.next();
                self.filters.offset = 0;
                vec![Effect::SyncUrl, Effect::LoadTransactions]
            }
            Command::FlipOrder => {
                self.filters.order = self.filters.order.flipped();
                self.filters.offset = 0;
                vec![Effect::SyncUrl, Effect::LoadTransactions]
            }
        }
    }

    fn accepts_text(&self) -> bool {
        self.focus == IndexControl::Ticker && self.tickers.get().is_some()
    }

    fn begin(&mut self, effect: Effect, api: &ApiBase) -> Option<PendingRequest> {
        let (channel, url) = match effect {
            Effect::LoadSenators => (Channel::Senators, api.url(&SenatorsQuery::default())),
            Effect::LoadTickers => (Channel::Tickers, api.url(&TickersQuery::default())),
            Effect::LoadTransactions => (Channel::Transactions, api.url(&self.transaction_query())),
            Effect::LoadTransactionCount => {
                let query = self.transaction_query();
                let count = TransactionCountQuery {
                    senator: query.senator,
                    side: query.side,
                    ticker: query.ticker,
                };
                return Some(issue(
                    &mut self.tracker,
                    Channel::TransactionCount,
                    api.url(&count),
                ));
            }
            Effect::LoadActivity => {
                let query = ActivityQuery {
                    period: self.activity.period,
                    side: self.activity.side,
                    top_n: DEFAULT_TOP_N,
                    start: self.filters.start,
                    end: self.filters.end,
                };
                (Channel::Activity, api.url(&query))
            }
            Effect::SyncUrl | Effect::LoadTimeseries => return None,
        };
        self.status.clear();
        Some(issue(&mut self.tracker, channel, url))
    }

    fn complete(
        &mut self,
        request: &PendingRequest,
        result: Result<Payload, ApiError>,
    ) -> Vec<Effect> {
        if !accept(&mut self.tracker, request) {
            return Vec::new();
        }
        match request.channel() {
            Channel::Senators => self.apply_senators(result),
            Channel::Tickers => self.apply_tickers(result),
            Channel::Transactions => {
                self.apply_transactions(result);
                Vec::new()
            }
            Channel::TransactionCount => {
                self.apply_count(result);
                Vec::new()
            }
            Channel::Activity => {
                self.apply_activity(result);
                Vec::new()
            }
            Channel::Timeseries => {
                tracing::debug!("time series response ignored on the transactions page");
                Vec::new()
            }
        }
    }

    fn status(&self) -> Option<&str> {
        self.status.get()
    }

    fn is_loading(&self) -> bool {
        self.tracker.is_loading()
    }
}
