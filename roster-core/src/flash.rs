//! One-shot flash messages carried in a cookie.
//!
//! A handler that redirects after a mutation returns a [`FlashMessage`]
//! alongside the redirect; it is stored in the `roster_flash` cookie. The next
//! page that extracts [`Flash`] reads the message, renders it, and returns the
//! `Flash` as a response part so the cookie is cleared in the same response.
//!
//! ```ignore
//! async fn store(...) -> impl IntoResponse {
//!     (FlashMessage::success("Student created"), Redirect::to("/students"))
//! }
//!
//! async fn index(flash: Flash) -> (Flash, Html<String>) {
//!     let html = render(flash.message());
//!     (flash, Html(html))
//! }
//! ```

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};

use crate::cookies;

pub const FLASH_COOKIE: &str = "roster_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Info,
    Error,
}

impl FlashLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(FlashLevel::Success),
            "info" => Some(FlashLevel::Info),
            "error" => Some(FlashLevel::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(FlashLevel::Error, text)
    }

    /// Cookie-safe encoding (`level=success&text=Student+created`).
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("level", self.level.as_str())
            .append_pair("text", &self.text)
            .finish()
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let mut level = None;
        let mut text = None;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "level" => level = FlashLevel::parse(&value),
                "text" => text = Some(value.into_owned()),
                _ => {}
            }
        }
        Some(Self::new(level?, text?))
    }
}

impl IntoResponseParts for FlashMessage {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(value) = cookies::set(FLASH_COOKIE, &self.encode()) {
            res.headers_mut().append(SET_COOKIE, value);
        }
        Ok(res)
    }
}

/// Extractor for the flash message queued by the previous request.
///
/// Returning it as a response part clears the cookie, so the message is shown
/// exactly once.
#[derive(Debug, Clone, Default)]
pub struct Flash {
    message: Option<FlashMessage>,
    present: bool,
}

impl Flash {
    pub fn message(&self) -> Option<&FlashMessage> {
        self.message.as_ref()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Flash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = cookies::read(&parts.headers, FLASH_COOKIE);
        Ok(Flash {
            present: raw.is_some(),
            message: raw.as_deref().and_then(FlashMessage::decode),
        })
    }
}

impl IntoResponseParts for Flash {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.present {
            if let Some(value) = cookies::expire(FLASH_COOKIE) {
                res.headers_mut().append(SET_COOKIE, value);
            }
        }
        Ok(res)
    }
}
