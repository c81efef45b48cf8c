//! Cookie Management Infrastructure
//!
//! Builds `Set-Cookie` values for the refresh-token cookie and reads cookies
//! back out of request headers.

use axum::http::{HeaderMap, HeaderValue, header};

/// Name of the refresh-token cookie
pub const REFRESH_COOKIE_NAME: &str = "jwt";

/// Cookie lifetime, matches the refresh token lifetime (3 days)
pub const REFRESH_COOKIE_MAX_AGE_SECS: i64 = 3 * 24 * 60 * 60;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Strict,
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
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self::refresh_token()
    }
}

impl CookieConfig {
    /// `jwt` cookie: HttpOnly, Secure, SameSite=Strict, 3 days
    pub fn refresh_token() -> Self {
        Self {
            name: REFRESH_COOKIE_NAME.to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            max_age_secs: Some(REFRESH_COOKIE_MAX_AGE_SECS),
        }
    }

    /// Same cookie without `Secure`, for plain-http local development
    pub fn insecure_development() -> Self {
        Self {
            secure: false,
            ..Self::refresh_token()
        }
    }

    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);
        self.push_attributes(&mut cookie);

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build Set-Cookie header for deletion.
    ///
    /// Browsers only drop a cookie when the clearing header carries the
    /// same attributes it was set with.
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!("{}=", self.name);
        self.push_attributes(&mut cookie);
        cookie.push_str("; Max-Age=0");
        cookie
    }

    fn push_attributes(&self, cookie: &mut String) {
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
    }
}

/// Extract a cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name && !value.is_empty() {
                Some(value.to_string())
            } else {
                None
            }
        })
}

/// Create a Set-Cookie header value
pub fn set_cookie_header(config: &CookieConfig, value: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&config.build_set_cookie(value)).ok()
}

/// Create a clearing Set-Cookie header value
pub fn delete_cookie_header(config: &CookieConfig) -> Option<HeaderValue> {
    HeaderValue::from_str(&config.build_delete_cookie()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_defaults() {
        let cookie = CookieConfig::default().build_set_cookie("token123");
        assert!(cookie.starts_with("jwt=token123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=259200"));
    }

    #[test]
    fn test_delete_cookie_keeps_attributes() {
        let cookie = CookieConfig::refresh_token().build_delete_cookie();
        assert!(cookie.starts_with("jwt=;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.ends_with("Max-Age=0"));
    }

    #[test]
    fn test_insecure_development() {
        let cookie = CookieConfig::insecure_development().build_set_cookie("v");
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; jwt=abc123; other=xyz"),
        );

        assert_eq!(extract_cookie(&headers, "jwt"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_empty_cookie_is_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("jwt="));
        assert_eq!(extract_cookie(&headers, "jwt"), None);
    }

    #[test]
    fn test_extract_across_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("jwt=xyz"));
        assert_eq!(extract_cookie(&headers, "jwt"), Some("xyz".to_string()));
    }
}
