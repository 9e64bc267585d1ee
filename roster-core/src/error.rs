use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::html::error_page;

/// Helper to create an HTML error response.
pub fn error_response(status: StatusCode, message: impl AsRef<str>) -> Response {
    (status, Html(error_page(status, message.as_ref()))).into_response()
}

/// Request-level failure rendered as an HTML error page.
///
/// Validation failures are not represented here: handlers redisplay the
/// originating form instead of failing the request.
pub enum HttpError {
    NotFound(String),
    BadRequest(String),
    Forbidden(String),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            HttpError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                error_response(status, "Something went wrong on our side.")
            }
            HttpError::NotFound(msg) | HttpError::BadRequest(msg) | HttpError::Forbidden(msg) => {
                error_response(status, msg)
            }
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            HttpError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            HttpError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            HttpError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl std::fmt::Debug for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for HttpError {}

impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        HttpError::Internal(err.to_string())
    }
}
