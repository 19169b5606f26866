use senate_trades_core::{ApiError, Payload, PendingRequest};
use tokio::sync::mpsc::UnboundedSender;

use crate::api::ApiClient;
use crate::app::App;
use crate::cli::PageKind;

/// A request issued by one of the pages, waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub page: PageKind,
    pub request: PendingRequest,
}

#[derive(Debug)]
pub struct ApiResponse {
    pub page: PageKind,
    pub request: PendingRequest,
    pub result: Result<Payload, ApiError>,
}

/// Sends each request on its own task; replies come back over `tx`.
pub fn spawn_requests(
    client: &ApiClient,
    tx: &UnboundedSender<ApiResponse>,
    requests: Vec<OutgoingRequest>,
) {
    for OutgoingRequest { page, request } in requests {
        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.fetch(&request).await;
            if tx
                .send(ApiResponse {
                    page,
                    request,
                    result,
                })
                .is_err()
            {
                tracing::debug!("event loop gone, dropping response");
            }
        });
    }
}

/// Runs `requests` and everything they lead to, one at a time, until the
/// pages have nothing left to load.
pub async fn run_to_completion(app: &mut App, client: &ApiClient, requests: Vec<OutgoingRequest>) {
    let mut queue: std::collections::VecDeque<OutgoingRequest> = requests.into();
    while let Some(OutgoingRequest { page, request }) = queue.pop_front() {
        let result = client.fetch(&request).await;
        queue.extend(app.receive(ApiResponse {
            page,
            request,
            result,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use senate_trades_core::ApiBase;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn transport_failure_reaches_the_page_over_the_channel() {
        let base = ApiBase::parse("http://127.0.0.1:8000").expect("valid base");
        let mut app = App::new(base, PageKind::Timeseries);
        let mut requests = app.start("");
        assert_eq!(requests.len(), 1);
        let OutgoingRequest { page, request } = requests.remove(0);
        assert!(app.is_loading());

        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(ApiResponse {
            page,
            request,
            result: Err(ApiError::Transport("connection refused".to_string())),
        })
        .expect("receiver alive");
        let response = rx.recv().await.expect("a response arrives");
        assert_eq!(response.page, PageKind::Timeseries);

        assert!(app.receive(response).is_empty());
        let status = app.current().status().unwrap_or_default();
        assert_eq!(status, "Error loading tickers: Network error: connection refused");
        assert!(!app.is_loading());
    }
}
