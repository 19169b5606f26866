use crate::chart::{timeseries_chart, ChartSlot, ChartSpec};
use crate::decode::{Channel, Payload};
use crate::domain::{cycle, SeriesMode};
use crate::error::ApiError;
use crate::query_state::{QueryParams, TimeseriesFilters};
use crate::request::{
    normalize_ticker, ApiBase, TickersQuery, TimeseriesQuery, TransactionQuery, TICKER_TABLE_LIMIT,
};
use crate::select::{ticker_options, TickerPicker};
use crate::slot::Slot;
use crate::table::TransactionTable;
use crate::tokens::RequestTracker;

use super::{
    accept, issue, report, Command, Effect, Page, PendingRequest, StatusLine,
    NO_TICKERS_MESSAGE, NO_TIMESERIES_MESSAGE, SELECT_TICKER_MESSAGE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeseriesControl {
    #[default]
    Ticker,
    Mode,
}

impl TimeseriesControl {
    pub const ALL: [Self; 2] = [Self::Ticker, Self::Mode];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ticker => "Ticker",
            Self::Mode => "Mode",
        }
    }
}

/// Monthly unique-senator chart for one ticker, with that ticker's trades below.
#[derive(Debug, Clone, Default)]
pub struct TimeseriesPage {
    filters: TimeseriesFilters,
    tickers: Slot<TickerPicker>,
    chart: ChartSlot,
    table: TransactionTable,
    focus: TimeseriesControl,
    tracker: RequestTracker,
    status: StatusLine,
}

impl TimeseriesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn filters(&self) -> &TimeseriesFilters {
        &self.filters
    }

    pub const fn ticker_picker(&self) -> Option<&TickerPicker> {
        self.tickers.get()
    }

    pub const fn chart(&self) -> Option<&ChartSpec> {
        self.chart.get()
    }

    pub const fn chart_slot(&self) -> &ChartSlot {
        &self.chart
    }

    pub const fn table(&self) -> &TransactionTable {
        &self.table
    }

    pub const fn focus(&self) -> TimeseriesControl {
        self.focus
    }

    fn select_ticker(&mut self, ticker: String) -> Vec<Effect> {
        if ticker == self.filters.ticker {
            return Vec::new();
        }
        self.filters.ticker = ticker;
        vec![Effect::SyncUrl, Effect::LoadTimeseries]
    }

    fn step_option(&mut self, delta: isize) -> Vec<Effect> {
        match self.focus {
            TimeseriesControl::Ticker => {
                let Some(picker) = self.tickers.get_mut() else {
                    return Vec::new();
                };
                if picker.is_searching() {
                    picker.move_highlight(delta);
                    return Vec::new();
                }
                let next = picker.options().cycle(picker.value(), delta);
                match next {
                    Some(next) if picker.set_value(&next) => self.select_ticker(next),
                    _ => Vec::new(),
                }
            }
            TimeseriesControl::Mode => {
                self.filters.mode = cycle(&SeriesMode::ALL, self.filters.mode, delta);
                vec![Effect::SyncUrl, Effect::LoadTimeseries]
            }
        }
    }

    fn apply_tickers(&mut self, result: Result<Payload, ApiError>) -> Vec<Effect> {
        let records = match result.and_then(Payload::into_tickers) {
            Ok(records) => records,
            Err(error) => {
                report(&mut self.status, "Error loading tickers", &error);
                return Vec::new();
            }
        };

        let options = ticker_options(&records, false);
        let Some(first) = options.first_value().map(str::to_string) else {
            self.tickers.clear();
            self.status.set(NO_TICKERS_MESSAGE);
            return Vec::new();
        };

        let mut picker = TickerPicker::new(options, &normalize_ticker(&self.filters.ticker));
        if picker.value().is_empty() {
            picker.set_value(&first);
        }
        self.filters.ticker = picker.value().to_string();
        self.tickers.replace(picker);
        vec![Effect::SyncUrl, Effect::LoadTimeseries]
    }

    fn apply_series(&mut self, result: Result<Payload, ApiError>) -> Vec<Effect> {
        match result.and_then(Payload::into_timeseries) {
            Ok(rows) if rows.is_empty() => {
                self.chart.clear();
                self.table.clear();
                self.status.set(NO_TIMESERIES_MESSAGE);
                Vec::new()
            }
            Ok(rows) => {
                self.chart
                    .replace(timeseries_chart(&self.filters.ticker, &rows, self.filters.mode));
                vec![Effect::LoadTransactions]
            }
            Err(error) => {
                report(&mut self.status, "Error loading chart", &error);
                Vec::new()
            }
        }
    }

    fn apply_transactions(&mut self, result: Result<Payload, ApiError>) {
        match result.and_then(Payload::into_transactions) {
            Ok(records) => self.table.replace(&records),
            Err(error) => report(&mut self.status, "Error loading transactions table", &error),
        }
    }
}

impl Page for TimeseriesPage {
    fn startup(&mut self, query: &str) -> Vec<Effect> {
        self.apply_query(query);
        vec![Effect::SyncUrl, Effect::LoadTickers]
    }

    fn apply_query(&mut self, query: &str) {
        self.filters.apply_query(&QueryParams::parse(query));
    }

    fn sync_query(&self, existing: &str) -> String {
        self.filters.sync_query(existing)
    }

    fn handle(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::FocusNext => {
                self.focus = cycle(&TimeseriesControl::ALL, self.focus, 1);
                Vec::new()
            }
            Command::FocusPrev => {
                self.focus = cycle(&TimeseriesControl::ALL, self.focus, -1);
                Vec::new()
            }
            Command::OptionNext => self.step_option(1),
            Command::OptionPrev => self.step_option(-1),
            Command::Input(ch) => {
                if let (TimeseriesControl::Ticker, Some(picker)) = (self.focus, self.tickers.get_mut()) {
                    picker.push_char(ch);
                }
                Vec::new()
            }
            Command::Backspace => {
                if let (TimeseriesControl::Ticker, Some(picker)) = (self.focus, self.tickers.get_mut()) {
                    picker.backspace();
                }
                Vec::new()
            }
            Command::Submit => {
                let committed = match (self.focus, self.tickers.get_mut()) {
                    (TimeseriesControl::Ticker, Some(picker)) => picker.commit(),
                    _ => None,
                };
                committed.map_or_else(Vec::new, |ticker| self.select_ticker(ticker))
            }
            Command::Clear => {
                if let Some(picker) = self.tickers.get_mut() {
                    picker.cancel_search();
                }
                Vec::new()
            }
            Command::ScrollUp => {
                self.table.scroll_up();
                Vec::new()
            }
            Command::ScrollDown => {
                self.table.scroll_down();
                Vec::new()
            }
            Command::Reload => vec![Effect::LoadTimeseries],
            Command::NextPage | Command::PrevPage | Command::CycleSort | Command::FlipOrder => {
                Vec::new()
            }
        }
    }

    fn accepts_text(&self) -> bool {
        self.focus == TimeseriesControl::Ticker && self.tickers.get().is_some()
    }

    fn begin(&mut self, effect: Effect, api: &ApiBase) -> Option<PendingRequest> {
        match effect {
            Effect::LoadTickers => {
                self.status.clear();
                Some(issue(
                    &mut self.tracker,
                    Channel::Tickers,
                    api.url(&TickersQuery::default()),
                ))
            }
            Effect::LoadTimeseries => {
                // Trades for the previous ticker or mode must not land after this.
                self.tracker.invalidate(Channel::Transactions);
                if self.filters.ticker.trim().is_empty() {
                    self.status.set(SELECT_TICKER_MESSAGE);
                    return None;
                }
                self.status.clear();
                let query = TimeseriesQuery {
                    ticker: self.filters.ticker.clone(),
                    mode: self.filters.mode,
                };
                Some(issue(&mut self.tracker, Channel::Timeseries, api.url(&query)))
            }
            Effect::LoadTransactions => {
                let query = TransactionQuery {
                    ticker: Some(self.filters.ticker.clone()),
                    side: self.filters.mode.side(),
                    limit: TICKER_TABLE_LIMIT,
                    offset: 0,
                    ..TransactionQuery::default()
                };
                Some(issue(&mut self.tracker, Channel::Transactions, api.url(&query)))
            }
            Effect::SyncUrl
            | Effect::LoadSenators
            | Effect::LoadTransactionCount
            | Effect::LoadActivity => None,
        }
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
            Channel::Tickers => self.apply_tickers(result),
            Channel::Timeseries => self.apply_series(result),
            Channel::Transactions => {
                self.apply_transactions(result);
                Vec::new()
            }
            channel => {
                tracing::debug!(channel = channel.label(), "response ignored on the time series page");
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
