//! Security-related response headers.
//!
//! # Default headers
//!
//! | Header | Value |
//! |--------|-------|
//! | `X-Content-Type-Options` | `nosniff` |
//! | `X-Frame-Options` | `DENY` |
//! | `Referrer-Policy` | `strict-origin-when-cross-origin` |
//! | `Content-Security-Policy` | [`DEFAULT_CSP`] |
//!
//! HSTS is off by default since the app is usually served over plain HTTP
//! behind a proxy; enable it with [`SecureHeadersBuilder::hsts`].

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;

/// Allows the Bootstrap stylesheet from jsDelivr and same-origin form posts.
pub const DEFAULT_CSP: &str =
    "default-src 'self'; style-src 'self' https://cdn.jsdelivr.net; form-action 'self'";

#[derive(Debug, Clone)]
pub struct SecureHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl SecureHeaders {
    pub fn builder() -> SecureHeadersBuilder {
        SecureHeadersBuilder::new()
    }

    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// Add the headers to every response produced by `router`.
    pub fn apply(self, router: Router) -> Router {
        let headers = Arc::new(self.headers);
        router.layer(axum::middleware::from_fn(move |req: Request, next: Next| {
            let headers = headers.clone();
            async move {
                let mut response: Response = next.run(req).await;
                for (name, value) in headers.iter() {
                    response.headers_mut().insert(name.clone(), value.clone());
                }
                response
            }
        }))
    }
}

impl Default for SecureHeaders {
    fn default() -> Self {
        SecureHeadersBuilder::new().build()
    }
}

pub struct SecureHeadersBuilder {
    content_type_options: bool,
    frame_options: Option<String>,
    hsts_max_age: Option<u64>,
    referrer_policy: Option<String>,
    content_security_policy: Option<String>,
}

impl SecureHeadersBuilder {
    fn new() -> Self {
        Self {
            content_type_options: true,
            frame_options: Some("DENY".to_string()),
            hsts_max_age: None,
            referrer_policy: Some("strict-origin-when-cross-origin".to_string()),
            content_security_policy: Some(DEFAULT_CSP.to_string()),
        }
    }

    pub fn content_type_options(mut self, enabled: bool) -> Self {
        self.content_type_options = enabled;
        self
    }

    /// Set the `X-Frame-Options` value (e.g. `"DENY"`, `"SAMEORIGIN"`).
    pub fn frame_options(mut self, value: impl Into<String>) -> Self {
        self.frame_options = Some(value.into());
        self
    }

    pub fn no_frame_options(mut self) -> Self {
        self.frame_options = None;
        self
    }

    /// Emit `Strict-Transport-Security` with the given `max-age` (seconds).
    pub fn hsts(mut self, max_age: u64) -> Self {
        self.hsts_max_age = Some(max_age);
        self
    }

    pub fn referrer_policy(mut self, value: impl Into<String>) -> Self {
        self.referrer_policy = Some(value.into());
        self
    }

    pub fn content_security_policy(mut self, value: impl Into<String>) -> Self {
        self.content_security_policy = Some(value.into());
        self
    }

    pub fn no_content_security_policy(mut self) -> Self {
        self.content_security_policy = None;
        self
    }

    pub fn build(self) -> SecureHeaders {
        let mut headers = Vec::new();

        if self.content_type_options {
            headers.push((
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ));
        }

        let optional = [
            ("x-frame-options", self.frame_options),
            (
                "strict-transport-security",
                self.hsts_max_age
                    .map(|age| format!("max-age={age}; includeSubDomains")),
            ),
            ("referrer-policy", self.referrer_policy),
            ("content-security-policy", self.content_security_policy),
        ];
        for (name, value) in optional {
            if let Some(val) = value.and_then(|v| HeaderValue::from_str(&v).ok()) {
                headers.push((HeaderName::from_static(name), val));
            }
        }

        SecureHeaders { headers }
    }
}
