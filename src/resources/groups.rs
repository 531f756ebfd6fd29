//
//  bcr-api
//  resources/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query groups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Draft, Listing, Query, Resource, ResourceHandle, ResourceId, ResourceManager, ResourceRef};
use crate::api::common::{Result, ValidationErrors};
use crate::session::Project;

/// A query as listed inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: ResourceId,

    #[serde(default)]
    pub name: Option<String>,
}

/// A query group as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: ResourceId,

    pub name: String,

    #[serde(default)]
    pub queries: Vec<GroupMember>,

    #[serde(default)]
    pub shared: Option<String>,
}

impl Resource for Group {
    const KIND: &'static str = "group";
    const PATH: &'static str = "querygroups";
    type Draft = GroupDraft;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Who can see a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sharing {
    #[default]
    Public,
    Private,
    Shared,
}

impl fmt::Display for Sharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
            Self::Shared => write!(f, "shared"),
        }
    }
}

impl FromStr for Sharing {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "shared" => Ok(Self::Shared),
            other => Err(format!(
                "unknown sharing '{}' (expected public, private or shared)",
                other
            )),
        }
    }
}

/// What a caller asks for: a name and the queries to group, by name or id.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    pub name: String,
    pub queries: Vec<ResourceRef>,
    pub shared: Sharing,
}

impl GroupSpec {
    pub fn new<I, Q>(name: impl Into<String>, queries: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<ResourceRef>,
    {
        Self {
            name: name.into(),
            queries: queries.into_iter().map(Into::into).collect(),
            shared: Sharing::default(),
        }
    }

    pub fn shared(mut self, shared: Sharing) -> Self {
        self.shared = shared;
        self
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_group(&self.name, self.queries.len())
    }
}

fn validate_group(name: &str, queries: usize) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require("name", name);
    if queries == 0 {
        errors.push("queries", "at least one query is required");
    }
    errors.into_result()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryId {
    pub id: ResourceId,
}

/// Request body for creating a group, with query ids already resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDraft {
    pub name: String,
    pub queries: Vec<QueryId>,
    pub shared: Sharing,
}

impl Draft for GroupDraft {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_group(&self.name, self.queries.len())
    }
}

/// Manager for query groups.
///
/// Groups are created from query names; the names are resolved through a
/// query manager bound to the same project.
pub struct Groups<'a> {
    inner: ResourceManager<'a, Group>,
    queries: ResourceManager<'a, Query>,
}

impl<'a> Groups<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self {
            inner: ResourceManager::new(project),
            queries: ResourceManager::new(project),
        }
    }

    pub fn manager(&self) -> &ResourceManager<'a, Group> {
        &self.inner
    }

    pub fn list(&self) -> Listing<'_, Group> {
        self.inner.list()
    }

    pub async fn get(&self, reference: impl Into<ResourceRef>) -> Result<Group> {
        self.inner.get(reference).await
    }

    pub async fn delete(&self, reference: impl Into<ResourceRef>) -> Result<()> {
        self.inner.delete(reference).await
    }

    /// Creates a group after resolving every query it names.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`](crate::ApiError::Validation) when the name or the query list is empty
    /// - [`ApiError::NotFound`](crate::ApiError::NotFound) (kind `query`) when a named query does not exist
    pub async fn create(&self, group: &GroupSpec) -> Result<ResourceHandle> {
        group.validate()?;

        let mut queries = Vec::with_capacity(group.queries.len());
        for reference in &group.queries {
            let id = self.queries.resolve(reference.clone()).await?;
            queries.push(QueryId { id });
        }

        let draft = GroupDraft {
            name: group.name.clone(),
            queries,
            shared: group.shared,
        };
        self.inner.create(&draft).await
    }

    /// Ids of the queries in a group.
    pub async fn members(&self, reference: impl Into<ResourceRef>) -> Result<Vec<ResourceId>> {
        let group = self.get(reference).await?;
        Ok(group.queries.into_iter().map(|q| q.id).collect())
    }
}
