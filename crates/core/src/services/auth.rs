use crate::constants::{LOGIN_PATH, PROFILE_PATH};
use crate::error::{ApiError, ApiResult};
use crate::http::{ApiClient, Payload, ReqwestTransport, RequestOptions, Transport};
use api_shared::{LoginRequest, LoginResponse, Profile};
use reqwest::Method;

/// Login, logout and profile lookup.
#[derive(Clone, Debug)]
pub struct AuthService<T = ReqwestTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> AuthService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a token and persists the token when one is returned.
    ///
    /// The request is sent without an `Authorization` header.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        let options = RequestOptions::new(Method::POST)
            .json(credentials)?
            .without_auth();
        let payload = self.client.request(LOGIN_PATH, options).await?;
        let response: LoginResponse = match payload {
            Some(Payload::Json(value)) => serde_json::from_value(value).map_err(ApiError::Decode)?,
            _ => LoginResponse::default(),
        };

        if let Some(token) = response.token.as_deref().filter(|t| !t.is_empty()) {
            self.client.store().set(Some(token));
        }

        Ok(response)
    }

    /// Forgets the stored token. No server call is made.
    pub fn logout(&self) {
        self.client.store().set(None);
    }

    /// The current user's profile.
    ///
    /// Returns `Ok(None)` without touching the network when no token is stored.
    pub async fn profile(&self) -> ApiResult<Option<Profile>> {
        if self.client.store().get().is_none() {
            return Ok(None);
        }

        self.client.get_json(PROFILE_PATH).await.map(Some)
    }
}
