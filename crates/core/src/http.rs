//! Authenticated HTTP client wrapper.
//!
//! [`ApiClient::request`] performs one request/response round trip against
//! `base_url + path`. It attaches the stored bearer token, serializes JSON bodies and turns the
//! response into an explicit [`Payload`] or a typed [`ApiError`]. There is no retry, no timeout
//! and no cancellation.
//!
//! The network itself sits behind [`Transport`] so the request/response rules can be exercised
//! without a server.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::store::SessionStore;
use api_shared::auth::bearer_header_value;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A response body, decided by the response's `Content-Type`.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}

impl Payload {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    /// The non-empty `error` string of a JSON body.
    pub fn error_message(&self) -> Option<&str> {
        self.as_json()?
            .get("error")?
            .as_str()
            .filter(|message| !message.is_empty())
    }
}

/// Per-call options for [`ApiClient::request`].
#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
    /// Attach the stored bearer token.
    pub auth: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
            auth: true,
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn without_auth(mut self) -> Self {
        self.auth = false;
        self
    }
}

/// A fully prepared request, ready for the wire.
#[derive(Clone, Debug)]
pub struct RawRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// A response as received from the wire.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Sends prepared requests.
pub trait Transport: Send + Sync {
    fn send(&self, request: RawRequest) -> impl Future<Output = ApiResult<RawResponse>> + Send;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: RawRequest) -> ApiResult<RawResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(Box::new(e)))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(Box::new(e)))?
            .to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Client for the prescription REST API.
#[derive(Clone, Debug)]
pub struct ApiClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
    store: SessionStore,
}

impl ApiClient<ReqwestTransport> {
    pub fn new(config: &ClientConfig, store: SessionStore) -> Self {
        Self::with_transport(config.base_url(), ReqwestTransport::new(), store)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: impl Into<String>, transport: T, store: SessionStore) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads its bearer token from.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Performs one round trip and returns the negotiated payload.
    ///
    /// # Returns
    /// * `Ok(None)` - for `204 No Content`
    /// * `Ok(Some(payload))` - for any other 2xx status
    ///
    /// # Errors
    /// * [`ApiError::Http`] for non-2xx statuses
    /// * [`ApiError::Transport`] when the request could not be completed
    /// * [`ApiError::Decode`] when a JSON-typed body does not parse
    pub async fn request(&self, path: &str, options: RequestOptions) -> ApiResult<Option<Payload>> {
        let request = self.prepare(path, options)?;
        tracing::debug!("{} {}", request.method, request.url);

        let response = self.transport.send(request).await?;
        interpret(response)
    }

    /// `GET` a JSON document and deserialize it.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        decode(self.request(path, RequestOptions::default()).await?)
    }

    /// Send a request whose response body, if any, is not needed.
    pub async fn send_empty(&self, method: Method, path: &str) -> ApiResult<()> {
        self.request(path, RequestOptions::new(method)).await?;
        Ok(())
    }

    fn prepare(&self, path: &str, options: RequestOptions) -> ApiResult<RawRequest> {
        let RequestOptions {
            method,
            body,
            mut headers,
            auth,
        } = options;

        if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }

        if auth && !headers.contains_key(AUTHORIZATION) {
            if let Some(token) = self.store.get() {
                let mut value = HeaderValue::from_str(&bearer_header_value(&token))
                    .map_err(|_| ApiError::InvalidToken)?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        let body = body
            .map(|value| serde_json::to_vec(&value))
            .transpose()
            .map_err(ApiError::Encode)?;

        Ok(RawRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body,
        })
    }
}

/// Negotiates the response body and maps non-2xx statuses to [`ApiError::Http`].
fn interpret(response: RawResponse) -> ApiResult<Option<Payload>> {
    if response.status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let is_json = response
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains(JSON_CONTENT_TYPE));

    let payload = if is_json {
        Payload::Json(serde_json::from_slice(&response.body).map_err(ApiError::Decode)?)
    } else {
        Payload::Text(String::from_utf8_lossy(&response.body).into_owned())
    };

    if !response.status.is_success() {
        let message = payload
            .error_message()
            .or_else(|| response.status.canonical_reason())
            .unwrap_or("Request failed")
            .to_string();
        return Err(ApiError::Http {
            message,
            status: response.status.as_u16(),
            details: payload,
        });
    }

    Ok(Some(payload))
}

fn decode<R: DeserializeOwned>(payload: Option<Payload>) -> ApiResult<R> {
    match payload {
        Some(Payload::Json(value)) => serde_json::from_value(value).map_err(ApiError::Decode),
        _ => Err(ApiError::UnexpectedPayload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use serde_json::json;

    fn client(fake: &FakeTransport, store: SessionStore) -> ApiClient<FakeTransport> {
        ApiClient::with_transport("http://rx.test", fake.clone(), store)
    }

    fn stored(token: &str) -> SessionStore {
        let store = SessionStore::in_memory();
        store.set(Some(token));
        store
    }

    #[tokio::test]
    async fn test_attaches_exactly_one_bearer_header() {
        let fake = FakeTransport::new();
        fake.push_json(200, json!([]));

        client(&fake, stored("tok-1"))
            .request("/api/v1/prescription", RequestOptions::default())
            .await
            .expect("request should succeed");

        let sent = fake.last_request();
        assert_eq!(sent.url, "http://rx.test/api/v1/prescription");
        let values: Vec<_> = sent.headers.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "Bearer tok-1");
    }

    #[tokio::test]
    async fn test_keeps_caller_supplied_authorization() {
        let fake = FakeTransport::new();
        fake.push_json(200, json!({}));

        let options = RequestOptions::default()
            .header(AUTHORIZATION, HeaderValue::from_static("Bearer explicit"));
        client(&fake, stored("tok-1"))
            .request("/x", options)
            .await
            .unwrap();

        let sent = fake.last_request();
        let values: Vec<_> = sent.headers.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec!["Bearer explicit"]);
    }

    #[tokio::test]
    async fn test_no_authorization_without_token_or_when_disabled() {
        let fake = FakeTransport::new();
        fake.push_json(200, json!({}));
        fake.push_json(200, json!({}));

        client(&fake, SessionStore::in_memory())
            .request("/a", RequestOptions::default())
            .await
            .unwrap();
        client(&fake, stored("tok"))
            .request("/b", RequestOptions::default().without_auth())
            .await
            .unwrap();

        for sent in fake.requests() {
            assert!(sent.headers.get(AUTHORIZATION).is_none());
        }
    }

    #[tokio::test]
    async fn test_body_defaults_to_json_content_type() {
        let fake = FakeTransport::new();
        fake.push_json(201, json!({ "ok": true }));

        let options = RequestOptions::new(Method::POST)
            .json(&json!({ "patientAge": 45 }))
            .unwrap();
        client(&fake, SessionStore::in_memory())
            .request("/p", options)
            .await
            .unwrap();

        let sent = fake.last_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.headers[CONTENT_TYPE], "application/json");
        let body: serde_json::Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "patientAge": 45 }));
    }

    #[tokio::test]
    async fn test_explicit_content_type_is_preserved() {
        let fake = FakeTransport::new();
        fake.push_text(200, "ok");

        let options = RequestOptions::new(Method::POST)
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .json("hello")
            .unwrap();
        client(&fake, SessionStore::in_memory())
            .request("/p", options)
            .await
            .unwrap();

        let sent = fake.last_request();
        let values: Vec<_> = sent.headers.get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(values, vec!["text/plain"]);
    }

    #[tokio::test]
    async fn test_no_content_yields_no_payload_whatever_the_content_type() {
        let fake = FakeTransport::new();
        fake.push_raw(204, Some("application/json"), b"not json");

        let payload = client(&fake, SessionStore::in_memory())
            .request("/p/1", RequestOptions::new(Method::DELETE))
            .await
            .unwrap();
        assert_eq!(payload, None);
    }

    #[tokio::test]
    async fn test_negotiates_json_and_text() {
        let fake = FakeTransport::new();
        fake.push_raw(200, Some("application/json; charset=utf-8"), br#"{"a":1}"#);
        fake.push_text(200, "plain body");

        let c = client(&fake, SessionStore::in_memory());
        let json = c.request("/j", RequestOptions::default()).await.unwrap();
        let text = c.request("/t", RequestOptions::default()).await.unwrap();

        assert_eq!(json, Some(Payload::Json(json!({ "a": 1 }))));
        assert_eq!(text, Some(Payload::Text("plain body".into())));
    }

    #[tokio::test]
    async fn test_json_error_uses_server_message_and_status() {
        let fake = FakeTransport::new();
        fake.push_json(401, json!({ "error": "X" }));

        let err = client(&fake, SessionStore::in_memory())
            .request("/api/auth/me", RequestOptions::default())
            .await
            .unwrap_err();

        match err {
            ApiError::Http {
                message,
                status,
                details,
            } => {
                assert_eq!(message, "X");
                assert_eq!(status, 401);
                assert_eq!(details, Payload::Json(json!({ "error": "X" })));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_text_error_uses_status_text() {
        let fake = FakeTransport::new();
        fake.push_text(503, "upstream down");

        let err = client(&fake, SessionStore::in_memory())
            .request("/x", RequestOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Service Unavailable");
        assert_eq!(err.status(), Some(503));
        assert!(matches!(
            err,
            ApiError::Http { details: Payload::Text(ref t), .. } if t == "upstream down"
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_typed() {
        let fake = FakeTransport::new();
        fake.push_transport_error();

        let err = client(&fake, SessionStore::in_memory())
            .request("/x", RequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_typed_decode_rejects_text() {
        let fake = FakeTransport::new();
        fake.push_text(200, "hello");

        let result: ApiResult<serde_json::Value> = client(&fake, SessionStore::in_memory())
            .get_json("/x")
            .await;
        assert!(matches!(result, Err(ApiError::UnexpectedPayload)));
    }
}
