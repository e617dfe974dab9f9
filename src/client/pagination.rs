//! Pagination helpers for Management API list requests
//!
//! List endpoints take `page` (0-indexed) and `per_page` and, with
//! `include_totals=true`, answer with an envelope carrying `start`, `limit`
//! and `total` next to the items. [`fetch_all`] walks those pages until the
//! envelope says there is nothing left.

use std::future::Future;

use log::debug;
use serde::Deserialize;

use crate::error::Result;

/// Maximum `per_page` accepted by the Management API.
pub const MAX_PAGE_SIZE: usize = 100;

/// Pagination parameters for list requests.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new().page_size(50).page(2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationParams {
    /// Number of items per page (default and maximum: 100)
    pub page_size: Option<usize>,
    /// Page number (0-indexed)
    pub page: Option<usize>,
}

impl PaginationParams {
    /// Create new pagination params with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size (items per page).
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Convert to query string parameters.
    ///
    /// Always asks for totals so the response envelope can drive pagination.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let size = self.page_size.unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE);
        vec![
            ("page", self.page.unwrap_or(0).to_string()),
            ("per_page", size.to_string()),
            ("include_totals", "true".to_string()),
        ]
    }
}

/// Totals carried by every list envelope.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub total: usize,
}

impl ListMeta {
    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.total > self.start + self.limit
    }
}

/// A single page of results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_next: bool) -> Self {
        Self { items, has_next }
    }

    /// Build a page from the items and totals of a list envelope.
    pub fn from_envelope(items: Vec<T>, meta: ListMeta) -> Self {
        Self::new(items, meta.has_next())
    }
}

/// Fetch every page of a listing.
///
/// `limit == 0` fetches everything. Otherwise at most `limit` items are
/// returned. The page size stays fixed for the whole walk because the server
/// computes offsets as `page * per_page`.
/// The first error aborts the walk; no partial result is returned.
pub async fn fetch_all<T, F, Fut>(limit: usize, page_size: usize, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(PaginationParams) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut size = page_size.clamp(1, MAX_PAGE_SIZE);
    if limit > 0 {
        size = size.min(limit);
    }
    let mut items: Vec<T> = Vec::new();
    let mut page = 0;

    loop {
        let params = PaginationParams::new().page_size(size).page(page);
        let result = fetch_page(params).await?;
        debug!(
            "Fetched page {} ({} items, has_next={})",
            page,
            result.items.len(),
            result.has_next
        );

        let empty = result.items.is_empty();
        items.extend(result.items);
        page += 1;

        if (limit > 0 && items.len() >= limit) || !result.has_next || empty {
            break;
        }
    }

    if limit > 0 {
        items.truncate(limit);
    }
    Ok(items)
}
