//! Constants used throughout the RxDesk core crate.
//!
//! Endpoint paths, environment variable names and defaults live here so the client, the CLI
//! and the tests agree on them.

/// Base URL used when `RXDESK_API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the API base URL.
pub const API_BASE_URL_ENV: &str = "RXDESK_API_BASE_URL";

/// Environment variable overriding the directory holding the persisted token.
pub const TOKEN_DIR_ENV: &str = "RXDESK_TOKEN_DIR";

/// Directory name created under the user's config directory.
pub const APP_DIR_NAME: &str = "rxdesk";

/// Filename of the persisted auth token.
pub const TOKEN_FILE_NAME: &str = "auth_token";

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const PROFILE_PATH: &str = "/api/auth/me";
pub const PRESCRIPTIONS_PATH: &str = "/api/v1/prescription";
pub const DAY_WISE_REPORT_PATH: &str = "/api/v1/report/day-wise";

/// Message shown when a failure carries no server-provided message.
pub const UNEXPECTED_ERROR: &str = "Unexpected error occurred";
