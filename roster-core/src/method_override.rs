//! HTML forms can only submit GET and POST. A urlencoded POST carrying a
//! `_method` field of `put`, `patch` or `delete` is re-dispatched with that
//! method.
//!
//! The middleware has to run before routing, so [`AppBuilder`] installs it
//! around the application router rather than with `Router::layer`.
//!
//! [`AppBuilder`]: crate::builder::AppBuilder

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::form_body::{field, is_urlencoded, read_form};

pub const METHOD_FIELD: &str = "_method";

pub async fn method_override(req: Request, next: Next) -> Response {
    if req.method() != Method::POST || !is_urlencoded(req.headers()) {
        return next.run(req).await;
    }

    let (mut req, fields) = match read_form(req).await {
        Ok(read) => read,
        Err(err) => return err.into_response(),
    };

    if let Some(method) = field(&fields, METHOD_FIELD).and_then(overridden_method) {
        tracing::debug!(%method, path = %req.uri().path(), "method override");
        *req.method_mut() = method;
    }

    next.run(req).await
}

fn overridden_method(value: &str) -> Option<Method> {
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
