//! Target URL normalization

use actix_web::http::header::HeaderValue;

use crate::errors::{Result, SnaplinkError};

const DEFAULT_SCHEME_PREFIX: &str = "http://";

pub const INVALID_URL_MESSAGE: &str = "url contains invalid characters";

/// 规范化目标 URL
///
/// An empty URL is rejected. Anything that does not mention `http` anywhere
/// gets `http://` prepended, so `example.com` becomes `http://example.com`
/// while `https://example.com` is kept as is.
///
/// The result must be usable as a `Location` header value, so control
/// characters are rejected.
pub fn normalize_target_url(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(SnaplinkError::validation("url is required"));
    }

    let url = if raw.contains("http") {
        raw.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, raw)
    };

    if HeaderValue::from_str(&url).is_err() {
        return Err(SnaplinkError::validation(INVALID_URL_MESSAGE));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        let err = normalize_target_url("").unwrap_err();
        assert!(matches!(err, SnaplinkError::Validation(_)));
        assert_eq!(err.message(), "url is required");
    }

    #[test]
    fn test_bare_host_gets_http_prefix() {
        assert_eq!(
            normalize_target_url("example.com").unwrap(),
            "http://example.com"
        );
        assert_eq!(
            normalize_target_url("example.com/a?b=c").unwrap(),
            "http://example.com/a?b=c"
        );
    }

    #[test]
    fn test_existing_scheme_kept() {
        assert_eq!(
            normalize_target_url("https://example.com").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            normalize_target_url("http://example.com").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_http_anywhere_counts() {
        // 只要包含 "http" 就不再补前缀
        assert_eq!(
            normalize_target_url("example.com/http-docs").unwrap(),
            "example.com/http-docs"
        );
    }

    #[test]
    fn test_control_characters_rejected() {
        for raw in ["example.com/a\nb", "https://example.com/\r\nSet-Cookie: x=1", "a\u{7f}b"] {
            let err = normalize_target_url(raw).unwrap_err();
            assert!(matches!(err, SnaplinkError::Validation(_)), "{raw:?}");
            assert_eq!(err.message(), INVALID_URL_MESSAGE);
        }
    }
}
