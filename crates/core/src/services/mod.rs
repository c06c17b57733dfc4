//! Resource services.
//!
//! Each service maps one domain operation to one HTTP call through [`crate::ApiClient`].

pub mod auth;
pub mod prescriptions;
pub mod reports;

pub use auth::AuthService;
pub use prescriptions::PrescriptionService;
pub use reports::ReportService;

use crate::error::{ApiError, ApiResult};
use crate::http::Payload;
use serde::de::DeserializeOwned;

/// Decodes a list response. Anything other than a JSON array reads as an empty list.
pub(crate) fn decode_list<R: DeserializeOwned>(payload: Option<Payload>) -> ApiResult<Vec<R>> {
    match payload {
        Some(Payload::Json(value)) if value.is_array() => {
            serde_json::from_value(value).map_err(ApiError::Decode)
        }
        _ => Ok(Vec::new()),
    }
}

/// Decodes the record echoed back by a successful save. A body that is missing or not the
/// expected shape reads as `None`; the save itself already succeeded.
pub(crate) fn decode_saved<R: DeserializeOwned>(payload: Option<Payload>) -> Option<R> {
    match payload {
        Some(Payload::Json(value)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}
