//! Server configuration, resolved once at startup.

pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

pub const REST_ADDR_ENV: &str = "RXDESK_REST_ADDR";
pub const ADMIN_USERNAME_ENV: &str = "RXDESK_ADMIN_USERNAME";
pub const ADMIN_PASSWORD_ENV: &str = "RXDESK_ADMIN_PASSWORD";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

impl ServerConfig {
    /// Reads [`REST_ADDR_ENV`], [`ADMIN_USERNAME_ENV`] and [`ADMIN_PASSWORD_ENV`].
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(REST_ADDR_ENV).ok(),
            std::env::var(ADMIN_USERNAME_ENV).ok(),
            std::env::var(ADMIN_PASSWORD_ENV).ok(),
        )
    }

    /// Blank values fall back to the defaults.
    pub fn from_values(
        addr: Option<String>,
        admin_username: Option<String>,
        admin_password: Option<String>,
    ) -> Self {
        Self {
            addr: non_blank(addr).unwrap_or_else(|| DEFAULT_REST_ADDR.into()),
            admin_username: non_blank(admin_username)
                .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.into()),
            admin_password: non_blank(admin_password)
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.into()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
