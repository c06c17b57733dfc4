//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the client. Nothing
//! in this crate reads environment variables while requests are in flight; binaries read the
//! environment and hand the raw values to the helpers below.

use crate::constants::{APP_DIR_NAME, DEFAULT_API_BASE_URL};
use crate::error::{ConfigError, ConfigResult};
use crate::store::FileTokenStore;
use std::path::{Path, PathBuf};

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: String,
    token_dir: PathBuf,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// The base URL must be an absolute `http` or `https` URL. A trailing `/` is dropped so
    /// endpoint paths can be appended verbatim.
    pub fn new(base_url: impl Into<String>, token_dir: PathBuf) -> ConfigResult<Self> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/').to_string();

        let parsed = reqwest::Url::parse(&trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw,
                reason: "scheme must be http or https".into(),
            });
        }

        Ok(Self {
            base_url: trimmed,
            token_dir,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_dir(&self) -> &Path {
        &self.token_dir
    }

    /// The durable token store backing this configuration.
    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(&self.token_dir)
    }
}

/// Resolve the API base URL from an optional raw value.
///
/// `None` or a blank value yields [`DEFAULT_API_BASE_URL`].
pub fn base_url_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Resolve the token directory.
///
/// An explicit override wins; otherwise `<config dir>/rxdesk` is used.
pub fn resolve_token_dir(override_dir: Option<PathBuf>) -> ConfigResult<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let cfg = ClientConfig::new("http://localhost:8080/", PathBuf::from("/tmp/x"))
            .expect("valid config");
        assert_eq!(cfg.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_new_rejects_non_http_urls() {
        assert!(ClientConfig::new("ftp://example.com", PathBuf::new()).is_err());
        assert!(ClientConfig::new("not a url", PathBuf::new()).is_err());
    }

    #[test]
    fn test_base_url_defaults_when_blank() {
        assert_eq!(base_url_from_env_value(None), DEFAULT_API_BASE_URL);
        assert_eq!(
            base_url_from_env_value(Some("   ".into())),
            DEFAULT_API_BASE_URL
        );
        assert_eq!(
            base_url_from_env_value(Some(" https://rx.example.org ".into())),
            "https://rx.example.org"
        );
    }

    #[test]
    fn test_resolve_token_dir_prefers_override() {
        let dir = resolve_token_dir(Some(PathBuf::from("/srv/rxdesk"))).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/rxdesk"));
    }
}
