//! Bearer token helpers.
//!
//! The client formats `Authorization` header values with [`bearer_header_value`] and the server
//! extracts tokens with [`parse_bearer`], so both ends agree on the scheme.

/// Name of the header carrying the credential.
pub const AUTHORIZATION: &str = "Authorization";

/// Authentication scheme sent by the client.
pub const BEARER_SCHEME: &str = "Bearer";

/// Formats a token as an `Authorization` header value (`Bearer <token>`).
pub fn bearer_header_value(token: &str) -> String {
    format!("{BEARER_SCHEME} {token}")
}

/// Extracts the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for any other scheme or for an
/// empty token.
pub fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header_value_format() {
        assert_eq!(bearer_header_value("abc123"), "Bearer abc123");
    }

    #[test]
    fn test_parse_bearer_accepts_any_scheme_case() {
        assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("bearer   abc "), Some("abc"));
    }

    #[test]
    fn test_parse_bearer_rejects_other_schemes_and_empty_tokens() {
        assert_eq!(parse_bearer("Basic dXNlcjpwYXNz"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer(""), None);
    }
}
