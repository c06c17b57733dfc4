//! # API Shared
//!
//! Wire definitions shared by the RxDesk client and the reference REST server.
//!
//! Contains:
//! - JSON request/response types for prescriptions, reports and accounts (`models`)
//! - The calendar date range used as a query filter (`range`)
//! - Bearer token helpers usable by both sides of the wire (`auth`)
//! - A shared `HealthService`
//!
//! Used by `rxdesk-core` (client) and `api-rest` (server) so both agree on field names.

pub mod auth;
pub mod health;
pub mod models;
pub mod range;

pub use health::HealthService;
pub use models::*;
pub use range::{DateRange, RangeQuery};
