//! # RxDesk Core
//!
//! Client library for the RxDesk prescription service.
//!
//! Layers, bottom up:
//! - [`store`]: durable bearer token storage, best-effort
//! - [`http`]: the single request function every call goes through
//! - [`services`]: one method per REST operation
//! - [`session`] and [`guard`]: signed-in state and access to protected screens
//! - [`pages`]: per-screen state machines driven by a front end (see the `rxdesk` CLI)
//!
//! **No server concerns**: the reference REST server lives in `api-rest`; wire types shared by
//! both sides live in `api-shared`.

pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod guard;
pub mod http;
pub mod pages;
pub mod services;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ConfigError, ConfigResult, StoreError};
pub use guard::{GuardDecision, Route, RouteGuard};
pub use http::{ApiClient, Payload, RequestOptions, ReqwestTransport, Transport};
pub use services::{AuthService, PrescriptionService, ReportService};
pub use session::{AuthSession, SessionState};
pub use store::{FileTokenStore, MemoryTokenStore, SessionStore, TokenStore};

// Wire types, so front ends only need this crate.
pub use api_shared::{
    DateRange, DayCount, Gender, LoginRequest, LoginResponse, Prescription, PrescriptionPayload,
    Profile,
};
