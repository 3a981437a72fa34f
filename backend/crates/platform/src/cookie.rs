//! Session Cookie and Bearer Token Handling
//!
//! `Set-Cookie` values are built by hand; the session is the only cookie
//! the backend issues.

use axum::http::{HeaderMap, HeaderValue, header};

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

/// Attributes of the session cookie
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "bizcards_session".to_string(),
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// `Set-Cookie` value for a session living `max_age_secs`
    pub fn build_set_cookie(&self, value: &str, max_age_secs: i64) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite={}; Path={}; Max-Age={}",
            self.name,
            value,
            self.same_site.as_str(),
            self.path,
            max_age_secs
        );
        // Browsers refuse SameSite=None without Secure
        if self.secure || self.same_site == SameSite::None {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that expires the session cookie
    pub fn build_delete_cookie(&self) -> String {
        format!(
            "{}=; HttpOnly; SameSite={}; Path={}; Max-Age=0",
            self.name,
            self.same_site.as_str(),
            self.path
        )
    }

    pub fn set_cookie_header(&self, value: &str, max_age_secs: i64) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value, max_age_secs)).ok()
    }

    pub fn delete_cookie_header(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_delete_cookie()).ok()
    }
}

/// Extract a cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Extract the token of an `Authorization: Bearer <token>` header
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

/// Session token from the cookie, falling back to the bearer header
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    extract_cookie(headers, cookie_name).or_else(|| extract_bearer(headers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_set_cookie() {
        let config = CookieConfig {
            name: "sid".to_string(),
            secure: false,
            same_site: SameSite::Strict,
            path: "/api".to_string(),
        };

        let cookie = config.build_set_cookie("abc", 3600);
        assert_eq!(
            cookie,
            "sid=abc; HttpOnly; SameSite=Strict; Path=/api; Max-Age=3600"
        );
    }

    #[test]
    fn test_same_site_none_forces_secure() {
        let config = CookieConfig {
            secure: false,
            same_site: SameSite::None,
            ..CookieConfig::default()
        };
        assert!(config.build_set_cookie("abc", 60).ends_with("; Secure"));
    }

    #[test]
    fn test_delete_cookie() {
        let cookie = CookieConfig::default().build_delete_cookie();
        assert!(cookie.starts_with("bizcards_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sid=abc123; empty="),
        );

        assert_eq!(extract_cookie(&headers, "sid"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "empty"), None);
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tok.sig"),
        );
        assert_eq!(extract_bearer(&headers), Some("tok.sig".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(extract_bearer(&headers), None);
    }

    #[test]
    fn test_cookie_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sid=from-cookie"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(
            extract_session_token(&headers, "sid"),
            Some("from-cookie".to_string())
        );
        assert_eq!(
            extract_session_token(&headers, "other"),
            Some("from-header".to_string())
        );
    }
}
