// Page controllers for the dashboard.
// Each page owns its view state; front-ends feed it commands and responses
// and carry out the effects it returns.

pub mod index;
pub mod timeseries;

pub use index::{ActivityPanel, IndexControl, IndexPage};
pub use timeseries::{TimeseriesControl, TimeseriesPage};

use crate::decode::{Channel, Payload};
use crate::error::ApiError;
use crate::request::ApiBase;
use crate::tokens::{RequestToken, RequestTracker};

pub const NO_BUCKET_MESSAGE: &str = "No bucket selected.";
pub const NO_ACTIVITY_MESSAGE: &str = "No data for this selection.";
pub const NO_TIMESERIES_MESSAGE: &str = "No data for this ticker.";
pub const SELECT_TICKER_MESSAGE: &str = "Please select a ticker first.";
pub const NO_TICKERS_MESSAGE: &str =
    "No tickers available. Check /tickers endpoint and your database ticker values.";

/// User intent, already decoupled from whatever key or click produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FocusNext,
    FocusPrev,
    OptionNext,
    OptionPrev,
    Input(char),
    Backspace,
    Submit,
    Clear,
    NextPage,
    PrevPage,
    ScrollUp,
    ScrollDown,
    Reload,
    CycleSort,
    FlipOrder,
}

/// Work a page asks its front-end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Rewrite the URL (or share string) from the page's filters.
    SyncUrl,
    LoadSenators,
    LoadTickers,
    LoadTransactions,
    LoadTransactionCount,
    LoadActivity,
    LoadTimeseries,
}

impl Effect {
    pub const fn is_load(self) -> bool {
        !matches!(self, Self::SyncUrl)
    }
}

/// A request a page has issued and is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub token: RequestToken,
    pub url: String,
}

impl PendingRequest {
    pub const fn channel(&self) -> Channel {
        self.token.channel
    }
}

pub trait Page {
    /// Applies the initial query string and lists what to do on load.
    fn startup(&mut self, query: &str) -> Vec<Effect>;

    fn apply_query(&mut self, query: &str);

    /// `existing` rewritten with this page's filters.
    fn sync_query(&self, existing: &str) -> String;

    fn handle(&mut self, command: Command) -> Vec<Effect>;

    /// Whether the focused control takes typed characters.
    fn accepts_text(&self) -> bool;

    /// Turns a load effect into a request. `None` when the effect needs no
    /// request from this page (or cannot be issued right now).
    fn begin(&mut self, effect: Effect, api: &ApiBase) -> Option<PendingRequest>;

    fn complete(
        &mut self,
        request: &PendingRequest,
        result: Result<Payload, ApiError>,
    ) -> Vec<Effect>;

    fn status(&self) -> Option<&str>;

    fn is_loading(&self) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    message: Option<String>,
}

impl StatusLine {
    pub fn set(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.message = (!message.is_empty()).then_some(message);
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn get(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Issues a token on `tracker` and pairs it with `url`.
fn issue(tracker: &mut RequestTracker, channel: Channel, url: String) -> PendingRequest {
    let token = tracker.issue(channel);
    tracing::debug!(channel = channel.label(), seq = token.seq, %url, "request issued");
    PendingRequest { token, url }
}

/// Settles `request` and reports whether its response should be applied.
fn accept(tracker: &mut RequestTracker, request: &PendingRequest) -> bool {
    let current = tracker.settle(request.token);
    if !current {
        tracing::debug!(
            channel = request.channel().label(),
            seq = request.token.seq,
            "discarding stale response"
        );
    }
    current
}

fn report(status: &mut StatusLine, context: &str, error: &ApiError) {
    tracing::warn!(error = %error, "{context}");
    status.set(format!("{context}: {error}"));
}
