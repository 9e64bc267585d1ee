//! # roster-data
//!
//! Data layer shared by the student records app: the [`DataError`] type and
//! its mapping onto HTTP errors, the [`Pageable`]/[`Page`] pagination
//! contract and the SQLite pool setup.

pub mod error;
pub mod page;
pub mod pool;

pub use error::{DataError, DataResult};
pub use page::{Page, Pageable, DEFAULT_PAGE_SIZE, MAX_PAGE};
pub use pool::{connect, DatabaseConfig};

pub use sqlx::SqlitePool;
