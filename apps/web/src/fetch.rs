use senate_trades_core::query_state::location_with_query;
use senate_trades_core::{decode_response, ApiBase, ApiError, Payload, PendingRequest};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn js_error(value: JsValue) -> ApiError {
    ApiError::Transport(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// GETs the request's URL and decodes the body for its channel.
pub async fn get(request: &PendingRequest) -> Result<Payload, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Transport("no window".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let js_request = Request::new_with_str_and_init(&request.url, &opts).map_err(js_error)?;
    js_request
        .headers()
        .set("Accept", "application/json")
        .map_err(js_error)?;

    let value = JsFuture::from(window.fetch_with_request(&js_request))
        .await
        .map_err(js_error)?;
    let response: Response = value.dyn_into().map_err(js_error)?;

    let body = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    decode_response(
        request.channel(),
        response.status(),
        &response.status_text(),
        &body,
    )
}

/// `window.API_BASE` when set, else the page's own origin.
pub fn api_base() -> ApiBase {
    let raw = web_sys::window()
        .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str("API_BASE")).ok())
        .and_then(|value| serde_wasm_bindgen::from_value::<Option<String>>(value).ok())
        .flatten()
        .unwrap_or_default();

    ApiBase::parse(&raw).unwrap_or_else(|error| {
        web_sys::console::error_1(&format!("{error}; falling back to same origin").into());
        ApiBase::default()
    })
}

pub fn location() -> (String, String) {
    web_sys::window().map_or_else(
        || (String::new(), String::new()),
        |window| {
            let location = window.location();
            (
                location.pathname().unwrap_or_default(),
                location.search().unwrap_or_default(),
            )
        },
    )
}

/// Rewrites the address bar in place; no history entry is added.
pub fn replace_query(query: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let (pathname, _) = location();
    let url = location_with_query(&pathname, query);

    let result = window
        .history()
        .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&url)));
    if let Err(error) = result {
        web_sys::console::error_1(&error);
    }
}
