//! Screen state machines.
//!
//! Each page owns its local state (date range, loading/error/feedback, form) and orchestrates
//! calls into the services. Operations take `&mut self` and await their request, so one page
//! never has two loads in flight.

pub mod form;
pub mod login;
pub mod prescriptions;
pub mod reports;

pub use form::{FieldErrors, PrescriptionForm};
pub use login::LoginPage;
pub use prescriptions::{FormMode, FormState, PrescriptionsPage};
pub use reports::ReportsPage;

/// What a table should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableBody<'a, R> {
    Loading,
    /// Loaded, nothing to show; carries the empty-state message.
    Empty(&'static str),
    Rows(&'a [R]),
}

pub(crate) fn table_body<'a, R>(
    loading: bool,
    rows: &'a [R],
    empty: &'static str,
) -> TableBody<'a, R> {
    if loading {
        TableBody::Loading
    } else if rows.is_empty() {
        TableBody::Empty(empty)
    } else {
        TableBody::Rows(rows)
    }
}
