//! Double-submit CSRF protection.
//!
//! [`CsrfToken`] hands a per-browser token to views (creating and setting the
//! `roster_csrf` cookie on first use); every form embeds it as a hidden
//! `_token` field. [`verify_csrf`] rejects unsafe requests whose submitted
//! token does not match the cookie.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, IntoResponseParts, Response, ResponseParts};

use crate::cookies;
use crate::error::HttpError;
use crate::form_body::{field, is_urlencoded, read_form};
use crate::html::escape_html;

pub const CSRF_COOKIE: &str = "roster_csrf";
pub const CSRF_FIELD: &str = "_token";
pub const CSRF_HEADER: &str = "x-csrf-token";

/// The CSRF token bound to the current browser.
#[derive(Debug, Clone)]
pub struct CsrfToken {
    value: String,
    fresh: bool,
}

impl CsrfToken {
    /// Hidden form input carrying the token.
    pub fn hidden_input(&self) -> String {
        format!(
            r#"<input type="hidden" name="{CSRF_FIELD}" value="{}">"#,
            escape_html(&self.value)
        )
    }

    fn generate() -> Self {
        Self {
            value: uuid::Uuid::new_v4().simple().to_string(),
            fresh: true,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CsrfToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match cookies::read(&parts.headers, CSRF_COOKIE) {
            Some(value) if !value.is_empty() => CsrfToken {
                value,
                fresh: false,
            },
            _ => CsrfToken::generate(),
        })
    }
}

impl IntoResponseParts for CsrfToken {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.fresh {
            if let Some(value) = cookies::set(CSRF_COOKIE, &self.value) {
                res.headers_mut().append(SET_COOKIE, value);
            }
        }
        Ok(res)
    }
}

/// Middleware state for [`verify_csrf`].
#[derive(Debug, Clone, Copy)]
pub struct CsrfGuard {
    pub enabled: bool,
}

pub async fn verify_csrf(State(guard): State<CsrfGuard>, req: Request, next: Next) -> Response {
    if !guard.enabled || is_safe(req.method()) {
        return next.run(req).await;
    }

    let expected = cookies::read(req.headers(), CSRF_COOKIE);
    let header = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let (req, submitted) = match header {
        Some(token) => (req, Some(token)),
        None if is_urlencoded(req.headers()) => match read_form(req).await {
            Ok((req, fields)) => {
                let token = field(&fields, CSRF_FIELD).map(str::to_string);
                (req, token)
            }
            Err(err) => return err.into_response(),
        },
        None => (req, None),
    };

    match (expected, submitted) {
        (Some(expected), Some(submitted)) if !expected.is_empty() && expected == submitted => {
            next.run(req).await
        }
        _ => {
            tracing::warn!(method = %req.method(), path = %req.uri().path(), "CSRF token mismatch");
            HttpError::Forbidden("CSRF token mismatch. Reload the page and try again.".into())
                .into_response()
        }
    }
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}
