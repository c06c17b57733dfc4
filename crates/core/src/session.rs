//! Authentication session.
//!
//! [`AuthSession`] owns the signed-in state for the rest of the application. It is constructed
//! explicitly and handed to the pages and the route guard by reference.

use crate::error::ApiResult;
use crate::http::{ReqwestTransport, Transport};
use crate::services::AuthService;
use api_shared::{LoginRequest, LoginResponse, Profile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// The stored token has not been checked yet.
    Bootstrapping,
    Authenticated(Profile),
    Unauthenticated,
}

pub struct AuthSession<T = ReqwestTransport> {
    auth: AuthService<T>,
    state: SessionState,
}

impl<T: Transport> AuthSession<T> {
    pub fn new(auth: AuthService<T>) -> Self {
        Self {
            auth,
            state: SessionState::Bootstrapping,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&Profile> {
        match &self.state {
            SessionState::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Bootstrapping
    }

    /// Resolves the session from the stored token.
    ///
    /// No token, or any failure fetching the profile, resolves to
    /// [`SessionState::Unauthenticated`].
    pub async fn bootstrap(&mut self) -> &SessionState {
        self.state = match self.auth.profile().await {
            Ok(Some(profile)) => SessionState::Authenticated(profile),
            Ok(None) => SessionState::Unauthenticated,
            Err(e) => {
                tracing::warn!("Auth bootstrap failed: {}", e);
                SessionState::Unauthenticated
            }
        };
        &self.state
    }

    /// Signs in. On failure neither the state nor the stored token changes.
    pub async fn login(&mut self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        let response = self.auth.login(credentials).await?;
        self.state = SessionState::Authenticated(Profile {
            username: response.username.clone(),
        });
        Ok(response)
    }

    /// Clears the stored token. The server is not told.
    pub fn logout(&mut self) {
        self.auth.logout();
        self.state = SessionState::Unauthenticated;
    }
}
