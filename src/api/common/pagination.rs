//
//  bcr-api
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Brandwatch API Responses
//!
//! Collection endpoints return one page of results at a time, wrapped in an
//! envelope that carries the page index, the page size and the total number
//! of results:
//!
//! ```json
//! {
//!     "resultsTotal": 42,
//!     "resultsPage": 0,
//!     "resultsPageSize": 25,
//!     "results": [ ... ]
//! }
//! ```
//!
//! Pages are requested with the `page` (0-indexed) and `pageSize` query
//! parameters. Some endpoints omit the counters. Their pages are judged
//! against the page size that was requested instead.

use serde::{Deserialize, Serialize};

/// Query parameters for requesting one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,

    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

impl PageRequest {
    pub fn first(page_size: u32) -> Self {
        Self { page: 0, page_size }
    }

    pub fn next(self) -> Self {
        Self {
            page: self.page + 1,
            page_size: self.page_size,
        }
    }
}

/// One page of results from a Brandwatch collection endpoint.
///
/// # Example
///
/// ```rust
/// use bcr_api::api::common::{Page, PageRequest};
/// use serde::Deserialize;
///
/// #[derive(Clone, Deserialize)]
/// struct Tag {
///     id: i64,
///     name: String,
/// }
///
/// let json = r#"{
///     "resultsTotal": 3,
///     "resultsPage": 0,
///     "resultsPageSize": 2,
///     "results": [{"id": 1, "name": "urgent"}, {"id": 2, "name": "praise"}]
/// }"#;
///
/// let page: Page<Tag> = serde_json::from_str(json).unwrap();
/// assert!(page.has_next(PageRequest::first(2)));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    /// Total number of items across all pages, when the endpoint reports it.
    #[serde(default, rename = "resultsTotal")]
    pub results_total: Option<i64>,

    /// Index of this page (0-indexed).
    #[serde(default, rename = "resultsPage")]
    pub results_page: Option<i64>,

    /// Page size the server applied.
    #[serde(default, rename = "resultsPageSize")]
    pub results_page_size: Option<i64>,
}

impl<T> Page<T> {
    /// Checks if another page should be requested after `request`.
    ///
    /// A page is the last one when it is empty, when it is shorter than the
    /// page size, or when the running total reaches `resultsTotal`. Missing
    /// counters fall back to the requested page and size. A page longer than
    /// requested means the endpoint ignored paging and returned everything.
    pub fn has_next(&self, request: PageRequest) -> bool {
        if self.results.is_empty() {
            return false;
        }

        if self.results_page.is_none() || self.results_page_size.is_none() {
            tracing::debug!(
                "Page {} has no paging counters, judging it by the requested size {}",
                request.page,
                request.page_size
            );
        }
        let page = self.results_page.unwrap_or(i64::from(request.page));
        let size = self
            .results_page_size
            .unwrap_or(i64::from(request.page_size));
        let len = self.results.len() as i64;

        if size <= 0 || len < size {
            return false;
        }
        if self.results_page_size.is_none() && len > size {
            return false;
        }

        match self.results_total {
            Some(total) => (page + 1) * size < total,
            None => true,
        }
    }
}
