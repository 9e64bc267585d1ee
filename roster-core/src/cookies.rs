//! Minimal cookie plumbing for the flash and CSRF cookies.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

/// Read the value of cookie `name` from the request `Cookie` headers.
pub fn read(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value for a session cookie scoped to the whole site.
///
/// `value` must already be cookie-safe (no `;`, `,`, whitespace or quotes).
pub fn set(name: &str, value: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{name}={value}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .ok()
}

/// `Set-Cookie` value that deletes cookie `name`.
pub fn expire(name: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
    ))
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_named_cookie() {
        let h = headers("a=1; roster_csrf=abc; b=2");
        assert_eq!(read(&h, "roster_csrf").as_deref(), Some("abc"));
        assert_eq!(read(&h, "b").as_deref(), Some("2"));
    }

    #[test]
    fn missing_cookie_is_none() {
        let h = headers("a=1");
        assert!(read(&h, "roster_csrf").is_none());
        assert!(read(&HeaderMap::new(), "a").is_none());
    }

    #[test]
    fn expire_sets_zero_max_age() {
        let v = expire("roster_flash").unwrap();
        assert!(v.to_str().unwrap().contains("Max-Age=0"));
    }
}
