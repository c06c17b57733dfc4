//! Error responses.

use api_shared::ErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::BTreeMap;

pub const NOT_AUTHENTICATED: &str = "Not authenticated";
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Everything a handler can fail with. Each variant maps to one status and an [`ErrorBody`].
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),
}

pub type RestResult<T> = std::result::Result<T, RestError>;

impl RestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotAuthenticated | RestError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RestError::BadRequest(_) | RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            RestError::Validation(errors) => ErrorBody::with_errors(VALIDATION_FAILED, errors),
            other => ErrorBody::new(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(RestError::NotAuthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            RestError::Validation(BTreeMap::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::NotFound("gone".into()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(RestError::NotAuthenticated.to_string(), "Not authenticated");
        assert_eq!(
            RestError::Validation(BTreeMap::new()).to_string(),
            "Validation failed"
        );
    }
}
