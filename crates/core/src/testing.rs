//! Test doubles shared by the unit tests of this crate.

use crate::error::{ApiError, ApiResult};
use crate::http::{ApiClient, RawRequest, RawResponse, Transport};
use crate::store::SessionStore;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorded {
    requests: Vec<RawRequest>,
    responses: VecDeque<ApiResult<RawResponse>>,
}

/// A [`Transport`] that records every request and replays queued responses in order.
///
/// Clones share the same queue and log.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    inner: Arc<Mutex<Recorded>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_raw(&self, status: u16, content_type: Option<&'static str>, body: &[u8]) {
        let mut headers = HeaderMap::new();
        if let Some(content_type) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        let response = RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers,
            body: body.to_vec(),
        };
        self.inner.lock().unwrap().responses.push_back(Ok(response));
    }

    pub(crate) fn push_json(&self, status: u16, body: serde_json::Value) {
        let bytes = serde_json::to_vec(&body).unwrap();
        self.push_raw(status, Some("application/json"), &bytes);
    }

    pub(crate) fn push_text(&self, status: u16, body: &str) {
        self.push_raw(status, Some("text/plain"), body.as_bytes());
    }

    pub(crate) fn push_no_content(&self) {
        self.push_raw(204, None, b"");
    }

    pub(crate) fn push_transport_error(&self) {
        let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(Err(ApiError::Transport(Box::new(err))));
    }

    pub(crate) fn requests(&self) -> Vec<RawRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub(crate) fn last_request(&self) -> RawRequest {
        self.requests().pop().expect("no request was sent")
    }

    /// Requests whose method and path (query string excluded) match.
    pub(crate) fn count(&self, method: reqwest::Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && url_path(&r.url) == path)
            .count()
    }

    pub(crate) fn client(&self, store: SessionStore) -> ApiClient<FakeTransport> {
        ApiClient::with_transport("http://rx.test", self.clone(), store)
    }
}

fn url_path(url: &str) -> &str {
    let without_base = url.strip_prefix("http://rx.test").unwrap_or(url);
    without_base.split('?').next().unwrap_or(without_base)
}

impl Transport for FakeTransport {
    async fn send(&self, request: RawRequest) -> ApiResult<RawResponse> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request);
        inner
            .responses
            .pop_front()
            .expect("FakeTransport has no queued response")
    }
}
