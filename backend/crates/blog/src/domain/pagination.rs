//! Page-number pagination
//!
//! `page` is 1-based. A page of `limit` items starts at `(page - 1) * limit`.
//! There is a next page while the total count exceeds `page * limit`, and a
//! previous page whenever `page > 1`.

use kernel::validation::{ValidationError, optional_positive};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 6;

/// Validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Zero is raised to one
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).max(1),
        }
    }

    /// Parse raw `page` / `limit` query values. Absent or empty values take
    /// the defaults; anything else must be a positive integer.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self::new(
            optional_positive("page", page)?,
            optional_positive("limit", limit)?,
        ))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1).saturating_mul(i64::from(self.limit))
    }
}

/// One page of results with its neighbours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        let seen = i64::from(request.page).saturating_mul(i64::from(request.limit));
        Self {
            items,
            next_page: if total > seen {
                request.page.checked_add(1)
            } else {
                None
            },
            prev_page: (request.page > 1).then(|| request.page - 1),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_page: self.next_page,
            prev_page: self.prev_page,
        }
    }
}
