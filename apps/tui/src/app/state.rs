use senate_trades_core::{ApiBase, Command, Effect, IndexPage, Page, TimeseriesPage};
use throbber_widgets_tui::ThrobberState;

use crate::app::actions::{ApiResponse, OutgoingRequest};
use crate::cli::PageKind;

/// Both dashboard pages. Only the shown one takes input, but responses for
/// the other still land.
#[derive(Debug, Default)]
pub struct Pages {
    pub index: IndexPage,
    pub timeseries: TimeseriesPage,
}

impl Pages {
    pub fn get(&self, kind: PageKind) -> &dyn Page {
        match kind {
            PageKind::Index => &self.index,
            PageKind::Timeseries => &self.timeseries,
        }
    }

    pub fn get_mut(&mut self, kind: PageKind) -> &mut dyn Page {
        match kind {
            PageKind::Index => &mut self.index,
            PageKind::Timeseries => &mut self.timeseries,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub page: PageKind,
    pub pages: Pages,
    pub throbber: ThrobberState,
    api: ApiBase,
    index_query: String,
    timeseries_query: String,
    started: Vec<PageKind>,
}

impl App {
    pub fn new(api: ApiBase, page: PageKind) -> Self {
        Self {
            running: true,
            show_help: false,
            page,
            pages: Pages::default(),
            throbber: ThrobberState::default(),
            api,
            index_query: String::new(),
            timeseries_query: String::new(),
            started: Vec::new(),
        }
    }

    pub const fn api(&self) -> &ApiBase {
        &self.api
    }

    pub fn current(&self) -> &dyn Page {
        self.pages.get(self.page)
    }

    /// Starts the shown page from `query`.
    pub fn start(&mut self, query: &str) -> Vec<OutgoingRequest> {
        self.start_page(self.page, query)
    }

    fn start_page(&mut self, kind: PageKind, query: &str) -> Vec<OutgoingRequest> {
        tracing::info!(page = kind.title(), %query, "starting page");
        self.started.push(kind);
        *self.query_mut(kind) = query.trim_start_matches('?').to_string();
        let effects = self.pages.get_mut(kind).startup(query);
        self.dispatch(kind, effects)
    }

    /// Shows the other page, starting it on first visit.
    pub fn switch_page(&mut self) -> Vec<OutgoingRequest> {
        self.page = self.page.other();
        if self.started.contains(&self.page) {
            Vec::new()
        } else {
            self.start_page(self.page, "")
        }
    }

    pub fn apply(&mut self, command: Command) -> Vec<OutgoingRequest> {
        let kind = self.page;
        let effects = self.pages.get_mut(kind).handle(command);
        self.dispatch(kind, effects)
    }

    pub fn receive(&mut self, response: ApiResponse) -> Vec<OutgoingRequest> {
        let ApiResponse {
            page,
            request,
            result,
        } = response;
        if let Err(error) = &result {
            tracing::warn!(url = %request.url, %error, "request failed");
        }
        let effects = self.pages.get_mut(page).complete(&request, result);
        self.dispatch(page, effects)
    }

    /// Carries out `effects` for `kind`: rewrites its share query and turns
    /// loads into outgoing requests.
    pub fn dispatch(&mut self, kind: PageKind, effects: Vec<Effect>) -> Vec<OutgoingRequest> {
        let mut outgoing = Vec::new();
        for effect in effects {
            if effect == Effect::SyncUrl {
                let next = self.pages.get(kind).sync_query(self.query(kind));
                *self.query_mut(kind) = next;
                continue;
            }
            if let Some(request) = self.pages.get_mut(kind).begin(effect, &self.api) {
                outgoing.push(OutgoingRequest {
                    page: kind,
                    request,
                });
            }
        }
        outgoing
    }

    /// Query string that reproduces the page's filters.
    pub fn query(&self, kind: PageKind) -> &str {
        match kind {
            PageKind::Index => &self.index_query,
            PageKind::Timeseries => &self.timeseries_query,
        }
    }

    fn query_mut(&mut self, kind: PageKind) -> &mut String {
        match kind {
            PageKind::Index => &mut self.index_query,
            PageKind::Timeseries => &mut self.timeseries_query,
        }
    }

    pub fn share_query(&self) -> &str {
        self.query(self.page)
    }

    pub fn is_loading(&self) -> bool {
        self.pages.index.is_loading() || self.pages.timeseries.is_loading()
    }

    /// Advances per-frame state.
    pub fn tick(&mut self) {
        if self.is_loading() {
            self.throbber.calc_next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use senate_trades_core::decode::Channel;
    use senate_trades_core::models::{TickerRecord, TransactionRecord};
    use senate_trades_core::Payload;

    fn app(page: PageKind) -> App {
        App::new(
            ApiBase::parse("http://127.0.0.1:8000").expect("valid base"),
            page,
        )
    }

    fn find(outgoing: &[OutgoingRequest], channel: Channel) -> OutgoingRequest {
        outgoing
            .iter()
            .find(|o| o.request.channel() == channel)
            .cloned()
            .expect("request for channel")
    }

    #[test]
    fn index_start_issues_every_load_and_writes_share_query() {
        let mut app = app(PageKind::Index);
        let outgoing = app.start("side=SELL&utm=mail");

        let channels: Vec<Channel> = outgoing.iter().map(|o| o.request.channel()).collect();
        assert_eq!(
            channels,
            [
                Channel::Senators,
                Channel::Tickers,
                Channel::Transactions,
                Channel::TransactionCount,
                Channel::Activity,
            ]
        );
        assert!(outgoing.iter().all(|o| o.page == PageKind::Index));
        assert_eq!(app.share_query(), "side=SELL&utm=mail&limit=50&offset=0");
        assert!(app.is_loading());
    }

    #[test]
    fn responses_feed_back_into_the_page() {
        let mut app = app(PageKind::Index);
        let outgoing = app.start("");
        let rows = find(&outgoing, Channel::Transactions);

        let follow_up = app.receive(ApiResponse {
            page: PageKind::Index,
            request: rows.request,
            result: Ok(Payload::Transactions(vec![TransactionRecord {
                full_name: "Jane Doe".to_string(),
                ticker: "AAPL".to_string(),
                side: "BUY".to_string(),
                tx_date: "2024-01-02".to_string(),
                tx_estimate: None,
            }])),
        });
        assert!(follow_up.is_empty());
        assert_eq!(app.pages.index.table().len(), 1);
    }

    #[test]
    fn commands_update_share_query() {
        let mut app = app(PageKind::Index);
        app.start("");
        let outgoing = app.apply(Command::NextPage);
        assert_eq!(outgoing.len(), 1);
        assert_eq!(app.share_query(), "limit=50&offset=50");
    }

    #[test]
    fn switching_starts_the_other_page_once() {
        let mut app = app(PageKind::Index);
        app.start("");
        let outgoing = app.switch_page();
        assert_eq!(app.page, PageKind::Timeseries);
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].request.channel(), Channel::Tickers);
        assert_eq!(app.share_query(), "mode=both");

        app.switch_page();
        assert!(app.switch_page().is_empty());
    }

    #[test]
    fn timeseries_chains_from_tickers_to_series() {
        let mut app = app(PageKind::Timeseries);
        let outgoing = app.start("mode=sell");
        let tickers = find(&outgoing, Channel::Tickers);

        let next = app.receive(ApiResponse {
            page: PageKind::Timeseries,
            request: tickers.request,
            result: Ok(Payload::Tickers(vec![TickerRecord {
                ticker: "NVDA".to_string(),
            }])),
        });
        assert_eq!(next.len(), 1);
        assert_eq!(
            next[0].request.url,
            "http://127.0.0.1:8000/timeseries/monthly?ticker=NVDA&mode=sell"
        );
        assert_eq!(app.share_query(), "mode=sell&ticker=NVDA");
    }
}
