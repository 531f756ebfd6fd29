//
//  bcr-api
//  resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Managers
//!
//! One manager per resource kind, each bound to a [`Project`]. Managers
//! translate caller-level requests into API calls and keep vendor ids out
//! of the caller's way: resources are addressed by name (or id, when the
//! caller has one) and a per-manager [`HandleCache`] remembers which id
//! belongs to which name.
//!
//! ## Resource Kinds
//!
//! | Manager | Kind | Endpoint |
//! |---------|------|----------|
//! | [`Queries`] | [`Query`] | `projects/{id}/queries` |
//! | [`Groups`] | [`Group`] | `projects/{id}/querygroups` |
//! | [`Tags`] | [`Tag`] | `projects/{id}/tags` |
//! | [`Categories`] | [`Category`] | `projects/{id}/categories` |
//!
//! ## Operations
//!
//! Every manager supports `list`, `get`, `create` and `delete`. Drafts are
//! validated locally before anything is sent, so a draft with a missing
//! required field fails with [`ApiError::Validation`] without a network
//! call.
//!
//! ```rust,no_run
//! use bcr_api::resources::TagDraft;
//!
//! # async fn run(project: &bcr_api::session::Project) -> bcr_api::Result<()> {
//! let tags = project.tags();
//!
//! let handle = tags.create(&TagDraft::new("needs-review")).await?;
//! let tag = tags.get("needs-review").await?;
//! assert_eq!(tag.id, handle.id);
//!
//! tags.delete(&handle).await?;
//! # Ok(())
//! # }
//! ```

mod cache;
mod categories;
mod groups;
mod listing;
mod queries;
mod tags;

pub use cache::*;
pub use categories::*;
pub use groups::*;
pub use listing::*;
pub use queries::*;
pub use tags::*;

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, Result, ValidationErrors};
use crate::session::Project;

/// Vendor-side identifier of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub i64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a caller refers to a resource: by name, or by id when it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    Name(String),
    Id(ResourceId),
}

impl ResourceRef {
    /// Interprets command-line input: all digits is an id, anything else a name.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<i64>() {
            Ok(id) if !trimmed.starts_with('-') && !trimmed.starts_with('+') => {
                Self::Id(ResourceId(id))
            }
            _ => Self::Name(trimmed.to_string()),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Id(id) => write!(f, "#{}", id),
        }
    }
}

impl From<&str> for ResourceRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ResourceRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for ResourceRef {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<ResourceId> for ResourceRef {
    fn from(id: ResourceId) -> Self {
        Self::Id(id)
    }
}

impl From<&ResourceHandle> for ResourceRef {
    fn from(handle: &ResourceHandle) -> Self {
        Self::Id(handle.id)
    }
}

impl From<ResourceHandle> for ResourceRef {
    fn from(handle: ResourceHandle) -> Self {
        Self::Id(handle.id)
    }
}

/// Caller-facing reference to a resource that exists on the vendor side.
///
/// Returned by `create` and `upload`; pass it back to `get`, `delete` or
/// `backfill` to skip the name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceHandle {
    pub kind: &'static str,
    pub id: ResourceId,
    pub name: String,
}

/// A resource kind served under `projects/{id}/{PATH}`.
pub trait Resource: DeserializeOwned + Clone {
    /// Singular name used in errors and logs.
    const KIND: &'static str;

    /// Collection path segment under the project.
    const PATH: &'static str;

    /// Payload accepted by create and update.
    type Draft: Draft;

    fn id(&self) -> ResourceId;

    fn name(&self) -> &str;

    fn handle(&self) -> ResourceHandle {
        ResourceHandle {
            kind: Self::KIND,
            id: self.id(),
            name: self.name().to_string(),
        }
    }
}

/// A create/update payload that can be checked before it is sent.
pub trait Draft: Serialize {
    fn name(&self) -> &str;

    /// Reports every missing or invalid field.
    fn validate(&self) -> std::result::Result<(), ValidationErrors>;
}

/// Generic CRUD manager for one resource kind in one project.
pub struct ResourceManager<'a, R: Resource> {
    project: &'a Project,
    cache: HandleCache,
    _kind: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> ResourceManager<'a, R> {
    pub fn new(project: &'a Project) -> Self {
        Self {
            project,
            cache: HandleCache::new(),
            _kind: PhantomData,
        }
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    pub fn cache(&self) -> &HandleCache {
        &self.cache
    }

    pub(crate) fn collection_path(&self) -> String {
        self.project.path(R::PATH)
    }

    pub(crate) fn item_path(&self, id: ResourceId) -> String {
        self.project.path(&format!("{}/{}", R::PATH, id))
    }

    /// Re-labels a transport-level 404 with this resource kind.
    fn relabel(&self, err: ApiError, reference: &ResourceRef) -> ApiError {
        match err {
            ApiError::NotFound { .. } => ApiError::not_found(R::KIND, reference.to_string()),
            other => other,
        }
    }

    /// Starts a lazy listing of every resource of this kind.
    pub fn list(&self) -> Listing<'_, R> {
        Listing::new(self, self.project.session().page_size())
    }

    /// Fetches every resource of this kind.
    pub async fn all(&self) -> Result<Vec<R>> {
        self.list().collect_all().await
    }

    /// Looks a resource up by exact name, walking the listing page by page.
    pub async fn find(&self, name: &str) -> Result<Option<R>> {
        let mut listing = self.list();
        while let Some(page) = listing.next_page().await? {
            if let Some(found) = page.into_iter().find(|r| r.name() == name) {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Returns the vendor id for a reference, consulting the cache first.
    pub async fn resolve(&self, reference: impl Into<ResourceRef>) -> Result<ResourceId> {
        let (id, _) = self.lookup(&reference.into()).await?;
        Ok(id)
    }

    /// Resolves a reference and reports whether the id came from the cache.
    async fn lookup(&self, reference: &ResourceRef) -> Result<(ResourceId, bool)> {
        match reference {
            ResourceRef::Id(id) => Ok((*id, false)),
            ResourceRef::Name(name) => {
                if let Some(id) = self.cache.get(name) {
                    return Ok((id, true));
                }
                match self.find(name).await? {
                    Some(found) => Ok((found.id(), false)),
                    None => Err(ApiError::not_found(R::KIND, name.as_str())),
                }
            }
        }
    }

    /// Runs `op` against the id behind `reference`.
    ///
    /// A 404 for an id taken from the cache means the resource was deleted or
    /// re-created elsewhere: the entry is dropped, the name is looked up
    /// again through the listing and `op` runs once more with the fresh id.
    pub(crate) async fn with_resolved<T, F, Fut>(&self, reference: &ResourceRef, op: F) -> Result<T>
    where
        F: Fn(ResourceId) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let (id, cached) = self.lookup(reference).await?;

        let result = match op(id).await {
            Err(ApiError::NotFound { .. }) if cached => {
                tracing::debug!("Cached id {} for {} {} is stale", id, R::KIND, reference);
                self.cache.remove_id(id);
                match self.lookup(reference).await {
                    Ok((fresh, _)) if fresh != id => op(fresh).await,
                    Ok(_) => Err(ApiError::not_found(R::KIND, reference.to_string())),
                    Err(err) => Err(err),
                }
            }
            other => other,
        };

        result.map_err(|err| {
            if matches!(err, ApiError::NotFound { .. }) {
                self.forget(reference);
            }
            self.relabel(err, reference)
        })
    }

    fn forget(&self, reference: &ResourceRef) {
        match reference {
            ResourceRef::Id(id) => self.cache.remove_id(*id),
            ResourceRef::Name(name) => {
                self.cache.remove(name);
            }
        }
    }

    /// Fetches one resource.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when no resource has that name or id.
    pub async fn get(&self, reference: impl Into<ResourceRef>) -> Result<R> {
        let reference = reference.into();
        let resource: R = self
            .with_resolved(&reference, |id| async move {
                self.project.client().get::<R>(&self.item_path(id)).await
            })
            .await?;

        self.cache.insert(resource.name(), resource.id());
        Ok(resource)
    }

    /// Validates a draft locally, then creates the resource.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] (before any request) when a required field
    /// is missing or invalid.
    pub async fn create(&self, draft: &R::Draft) -> Result<ResourceHandle> {
        draft.validate()?;

        let created: R = self
            .project
            .client()
            .post(&self.collection_path(), draft)
            .await?;

        self.cache.insert(created.name(), created.id());
        tracing::info!("Created {} '{}' ({})", R::KIND, created.name(), created.id());
        Ok(created.handle())
    }

    /// Validates a draft locally, then replaces the resource's definition.
    pub async fn update(
        &self,
        reference: impl Into<ResourceRef>,
        draft: &R::Draft,
    ) -> Result<ResourceHandle> {
        draft.validate()?;

        let reference = reference.into();
        let body = serde_json::to_value(draft)?;

        let updated: R = self
            .with_resolved(&reference, |id| {
                let mut body = body.clone();
                if let serde_json::Value::Object(map) = &mut body {
                    map.insert("id".to_string(), serde_json::Value::from(id.0));
                }
                async move { self.project.client().put::<R, _>(&self.item_path(id), &body).await }
            })
            .await?;

        self.cache.remove_id(updated.id());
        self.cache.insert(updated.name(), updated.id());
        tracing::info!("Updated {} '{}' ({})", R::KIND, updated.name(), updated.id());
        Ok(updated.handle())
    }

    /// Deletes a resource and forgets its cached id.
    ///
    /// Re-creating a resource with the same name yields a new id.
    pub async fn delete(&self, reference: impl Into<ResourceRef>) -> Result<()> {
        let reference = reference.into();

        let id = self
            .with_resolved(&reference, |id| async move {
                self.project
                    .client()
                    .delete(&self.item_path(id))
                    .await
                    .map(|()| id)
            })
            .await?;

        self.cache.remove_id(id);
        tracing::info!("Deleted {} {}", R::KIND, reference);
        Ok(())
    }
}
