//
//  bcr-api
//  resources/listing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Lazy, restartable resource listings.

use super::{Resource, ResourceManager};
use crate::api::common::{Page, PageRequest, Result};

/// A lazy sequence of resources, fetched one page at a time.
///
/// Nothing is requested until [`next_page`](Self::next_page) is called.
/// [`restart`](Self::restart) rewinds to the first page so the same listing
/// can be walked again. Every resource seen is recorded in the manager's
/// name to id cache.
///
/// # Example
///
/// ```rust,no_run
/// # async fn run(project: &bcr_api::session::Project) -> bcr_api::Result<()> {
/// let tags = project.tags();
/// let mut listing = tags.list();
///
/// while let Some(page) = listing.next_page().await? {
///     for tag in page {
///         println!("{}", tag.name);
///     }
/// }
///
/// listing.restart();
/// let first_page = listing.next_page().await?;
/// # Ok(())
/// # }
/// ```
pub struct Listing<'m, R: Resource> {
    manager: &'m ResourceManager<'m, R>,
    page_size: u32,
    next: Option<PageRequest>,
}

impl<'m, R: Resource> Listing<'m, R> {
    pub(crate) fn new(manager: &'m ResourceManager<'m, R>, page_size: u32) -> Self {
        Self {
            manager,
            page_size,
            next: Some(PageRequest::first(page_size)),
        }
    }

    /// Fetches the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<R>>> {
        let Some(request) = self.next else {
            return Ok(None);
        };

        let path = self.manager.collection_path();
        let page: Page<R> = self
            .manager
            .project()
            .client()
            .get_with_query(&path, &request)
            .await?;

        self.next = if page.has_next(request) {
            Some(request.next())
        } else {
            None
        };

        for item in &page.results {
            self.manager.cache().insert(item.name(), item.id());
        }

        tracing::debug!(
            "Listed {} {} resource(s) from page {}",
            page.results.len(),
            R::KIND,
            request.page
        );

        Ok(Some(page.results))
    }

    /// Rewinds to the first page.
    pub fn restart(&mut self) {
        self.next = Some(PageRequest::first(self.page_size));
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Drains the remaining pages into one vector.
    pub async fn collect_all(mut self) -> Result<Vec<R>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }
}
