use serde::{Deserialize, Deserializer, Serialize};

/// Rows per listing page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Highest page number accepted; larger requests are clamped so the row
/// offset always fits a signed 64-bit SQL parameter.
pub const MAX_PAGE: u64 = i64::MAX as u64 / DEFAULT_PAGE_SIZE;

/// Pagination parameters, extractable from query params (`?page=2`).
///
/// Pages are 1-based. A missing, non-numeric, or zero page is treated as the
/// first page; the size is fixed server-side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pageable {
    #[serde(default = "first_page", deserialize_with = "lenient_page")]
    pub page: u64,
    #[serde(skip_deserializing, default = "default_page_size")]
    pub size: u64,
}

fn first_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn lenient_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|page| *page >= 1)
        .map(|page| page.min(MAX_PAGE))
        .unwrap_or(1))
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pageable {
    pub fn of(page: u64, size: u64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            size,
        }
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }
}

/// A page of results with pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        let total_pages = if pageable.size == 0 {
            0
        } else {
            total_elements.div_ceil(pageable.size)
        };
        Self {
            content,
            page: pageable.page,
            size: pageable.size,
            total_elements,
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Running number of the first row on this page (1-based).
    pub fn first_row_number(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.size)
            .saturating_add(1)
    }
}
