//! Cookie Management Infrastructure
//!
//! Session cookie building and request cookie parsing.

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Utc};

/// `Expires` value used to clear a cookie
const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    fn attributes(&self) -> String {
        let mut attrs = format!("; Path={}", self.path);
        if self.http_only {
            attrs.push_str("; HttpOnly");
        }
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        attrs
    }

    /// Build Set-Cookie header value expiring at `expires`
    pub fn build_set_cookie(&self, value: &str, expires: DateTime<Utc>) -> String {
        format!(
            "{}={}; Expires={}{}",
            self.name,
            value,
            http_date(expires),
            self.attributes()
        )
    }

    /// Build Set-Cookie header for deletion (expired)
    pub fn build_delete_cookie(&self) -> String {
        format!(
            "{}=; Expires={}; Max-Age=0{}",
            self.name,
            EPOCH_EXPIRES,
            self.attributes()
        )
    }
}

/// RFC 1123 date as used by the `Expires` attribute
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Extract a cookie value from headers
///
/// Looks through every `Cookie` header; the first match wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.trim().to_string())
            } else {
                None
            }
        })
}

/// Convert a built cookie string into a header value
pub fn to_header_value(cookie: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(cookie).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config(secure: bool) -> CookieConfig {
        CookieConfig {
            name: "lumen_session".to_string(),
            secure,
            ..CookieConfig::default()
        }
    }

    #[test]
    fn test_cookie_config_build() {
        let expires = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        let cookie = config(true).build_set_cookie("value123", expires);

        assert!(cookie.starts_with("lumen_session=value123"));
        assert!(cookie.contains("Expires=Tue, 05 Mar 2024 07:08:09 GMT"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn test_insecure_cookie_omits_secure() {
        let cookie = config(false).build_set_cookie("v", Utc::now());
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_delete_cookie() {
        let cookie = config(false).build_delete_cookie();
        assert!(cookie.starts_with("lumen_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; session=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "session"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session="));
        assert_eq!(extract_cookie(&headers, "session"), Some(String::new()));
    }
}
