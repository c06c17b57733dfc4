//! Bearer token authentication for protected routes.

use crate::error::RestError;
use crate::state::AppState;
use api_shared::auth::parse_bearer;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// The username behind a valid bearer token. Rejects with 401 otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser(pub String);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_bearer)
            .ok_or(RestError::NotAuthenticated)?;

        match state.user_for_token(token).await {
            Some(username) => Ok(CurrentUser(username)),
            None => {
                tracing::debug!("rejected unknown bearer token");
                Err(RestError::NotAuthenticated)
            }
        }
    }
}
