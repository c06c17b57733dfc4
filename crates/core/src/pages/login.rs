//! Sign-in screen.

use crate::constants::UNEXPECTED_ERROR;
use crate::error::ApiError;
use crate::guard::Route;
use crate::http::Transport;
use crate::session::AuthSession;
use api_shared::LoginRequest;

pub const LOGIN_FAILED: &str = "Failed to login";

/// Where to go after signing in: the screen the user was headed to, or the prescription list.
pub fn redirect_target(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(path) if !path.is_empty() && Route::from_path(path) != Route::Login => {
            path.to_string()
        }
        _ => Route::Prescriptions.path().to_string(),
    }
}

#[derive(Debug, Default)]
pub struct LoginPage {
    error: Option<String>,
    submitting: bool,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Where an already signed-in user should be sent instead of seeing this screen.
    pub fn already_signed_in<T: Transport>(
        session: &AuthSession<T>,
        from: Option<&str>,
    ) -> Option<String> {
        session.user().map(|_| redirect_target(from))
    }

    /// Signs in and returns the path to navigate to, or `None` with [`error`](Self::error) set.
    pub async fn submit<T: Transport>(
        &mut self,
        session: &mut AuthSession<T>,
        credentials: &LoginRequest,
        from: Option<&str>,
    ) -> Option<String> {
        self.error = None;
        self.submitting = true;

        let outcome = session.login(credentials).await;
        self.submitting = false;

        match outcome {
            Ok(_) => Some(redirect_target(from)),
            Err(ApiError::Http { message, .. }) => {
                self.error = Some(if message.is_empty() {
                    LOGIN_FAILED.to_string()
                } else {
                    message
                });
                None
            }
            Err(e) => {
                tracing::debug!("login failed: {}", e);
                self.error = Some(UNEXPECTED_ERROR.to_string());
                None
            }
        }
    }
}
