//! JSON-over-HTTP plumbing for the sync channel and the save flow.
//!
//! Mask and parameter pushes are fire-and-forget: a failed push is
//! logged to the console and otherwise dropped, because the next edit
//! re-sends full state and self-heals. Only the save call reports its
//! outcome to the caller.

use bokashi_editor::SaveResponse;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// Errors that can occur while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned status {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape.
    #[error("malformed response body: {0}")]
    MalformedResponse(String),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for HttpError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// POST a JSON body to `url` and check the response status.
///
/// # Errors
///
/// Returns [`HttpError::Encode`] if the body cannot be serialized,
/// [`HttpError::Status`] on a non-2xx response, and
/// [`HttpError::JsError`] if any browser API call fails.
pub async fn post_json<T: Serialize>(url: &str, body: &T) -> Result<Response, HttpError> {
    let payload = serde_json::to_string(body)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&payload));
    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts)?;
    let response = fetch(&request).await?;
    if response.ok() {
        Ok(response)
    } else {
        Err(HttpError::Status(response.status()))
    }
}

/// POST a JSON body without awaiting or surfacing the outcome.
///
/// Failures are swallowed after a console warning: the sync model is
/// push-only and the next edit carries the full current state.
pub fn post_and_forget<T: Serialize + 'static>(url: String, body: T) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = post_json(&url, &body).await {
            web_sys::console::warn_1(&format!("push to {url} failed: {e}").into());
        }
    });
}

/// POST to the save endpoint and parse its JSON status response.
///
/// # Errors
///
/// Returns [`HttpError::Status`] on a non-2xx response,
/// [`HttpError::MalformedResponse`] when the body is not the expected
/// JSON shape, and [`HttpError::JsError`] on browser API failures.
pub async fn request_save(url: &str) -> Result<SaveResponse, HttpError> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    let request = Request::new_with_str_and_init(url, &opts)?;

    let response = fetch(&request).await?;
    if !response.ok() {
        return Err(HttpError::Status(response.status()));
    }

    let body = JsFuture::from(response.text()?).await?;
    let body = body
        .as_string()
        .ok_or_else(|| HttpError::MalformedResponse("response body is not text".into()))?;
    serde_json::from_str(&body).map_err(|e| HttpError::MalformedResponse(e.to_string()))
}

/// Run a request through the window's `fetch` and type the response.
async fn fetch(request: &Request) -> Result<Response, HttpError> {
    let window = web_sys::window().ok_or_else(|| HttpError::JsError("no global window".into()))?;
    let value = JsFuture::from(window.fetch_with_request(request)).await?;
    value
        .dyn_into::<Response>()
        .map_err(|v| HttpError::JsError(format!("fetch did not yield a Response: {v:?}")))
}
