use crate::http::Payload;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Failure of a single API round trip.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    ///
    /// `message` is the server's `error` field when the body was JSON, otherwise the status
    /// text. `details` is the full parsed body.
    #[error("{message}")]
    Http {
        message: String,
        status: u16,
        details: Payload,
    },
    #[error("network error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("failed to decode response: {0}")]
    Decode(serde_json::Error),
    #[error("failed to encode request body: {0}")]
    Encode(serde_json::Error),
    #[error("expected a JSON response body")]
    UnexpectedPayload,
    #[error("stored token is not a valid header value")]
    InvalidToken,
}

impl ApiError {
    /// HTTP status code for server-side failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field-level validation messages from the `errors` object of the response body.
    ///
    /// Returns `None` unless the body was JSON with an `errors` object; non-string entries are
    /// skipped.
    pub fn field_errors(&self) -> Option<BTreeMap<String, String>> {
        let ApiError::Http {
            details: Payload::Json(body),
            ..
        } = self
        else {
            return None;
        };

        let errors = body.get("errors")?.as_object()?;
        Some(
            errors
                .iter()
                .filter_map(|(field, message)| {
                    message.as_str().map(|m| (field.clone(), m.to_string()))
                })
                .collect(),
        )
    }

    /// The server's message for HTTP failures, `fallback` for anything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure of the durable token storage.
///
/// These never escape [`crate::SessionStore`]; they are logged and treated as "no token".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read token file {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write token file {path}: {source}", path = path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove token file {path}: {source}", path = path.display())]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create token directory {path}: {source}", path = path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("token store lock poisoned")]
    Poisoned,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("could not determine a config directory; set RXDESK_TOKEN_DIR")]
    NoConfigDir,
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
