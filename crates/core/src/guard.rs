//! Route guard for screens that require a signed-in user.

use crate::session::SessionState;

/// Screens of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Prescriptions,
    Reports,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Prescriptions => "/prescriptions",
            Route::Reports => "/reports",
        }
    }

    /// Resolves a path to a screen. `/` and unknown paths land on the prescription list.
    pub fn from_path(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/reports" => Route::Reports,
            _ => Route::Prescriptions,
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still bootstrapping; show a loading indicator.
    Loading,
    /// Send the user to `to`, remembering where they were headed.
    Redirect { to: Route, from: String },
    Render,
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn check(state: &SessionState, requested: &str) -> GuardDecision {
        match state {
            SessionState::Bootstrapping => GuardDecision::Loading,
            SessionState::Unauthenticated => GuardDecision::Redirect {
                to: Route::Login,
                from: requested.to_string(),
            },
            SessionState::Authenticated(_) => GuardDecision::Render,
        }
    }
}
