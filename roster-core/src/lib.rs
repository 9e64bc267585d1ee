//! # roster-core
//!
//! Web runtime for the student records application: layered YAML
//! configuration, the HTML [`HttpError`], `garde`-backed [`FieldErrors`],
//! cookie-carried [`Flash`] messages, CSRF tokens, HTTP method override for
//! HTML forms, security headers, tracing setup and the [`AppBuilder`] that
//! wires them around an `axum::Router`.

pub mod builder;
pub mod config;
pub mod cookies;
pub mod csrf;
pub mod error;
pub mod flash;
mod form_body;
pub mod html;
pub mod layers;
pub mod method_override;
pub mod secure_headers;
pub mod validation;

pub use builder::AppBuilder;
pub use config::{ConfigError, ConfigProperties, ConfigValue, FromConfigValue, RosterConfig};
pub use csrf::{CsrfGuard, CsrfToken};
pub use error::HttpError;
pub use flash::{Flash, FlashLevel, FlashMessage};
pub use form_body::MAX_FORM_BYTES;
pub use html::escape_html;
pub use layers::{default_trace, init_tracing};
pub use secure_headers::SecureHeaders;
pub use validation::{FieldError, FieldErrors};
