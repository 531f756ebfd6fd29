//
//  bcr-api
//  session/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project-scoped context.
//!
//! A [`Project`] pairs a shared [`Session`] with a resolved project id.
//! Resource managers borrow it, so they cannot outlive the project they
//! operate on, and they can never run against an unresolved project.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Session;
use crate::api::common::Result;
use crate::api::BcrClient;
use crate::auth::Credentials;
use crate::resources::{Categories, Groups, Queries, Tags};
use crate::upload::ContentUploader;

/// A project as listed by `GET projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub timezone: Option<String>,
}

/// An authenticated session scoped to one resolved project.
///
/// # Example
///
/// ```rust,no_run
/// use bcr_api::api::BcrClient;
/// use bcr_api::auth::Credentials;
/// use bcr_api::session::Project;
///
/// # async fn run() -> bcr_api::Result<()> {
/// let project = Project::open(
///     BcrClient::new()?,
///     Credentials::token_for("analyst@example.com", "access-token"),
///     "Brand Health",
/// )
/// .await?;
///
/// for query in project.queries().list().collect_all().await? {
///     println!("{} ({})", query.name, query.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Project {
    session: Arc<Session>,
    reference: ProjectRef,
}

impl Project {
    pub(crate) fn new(session: Arc<Session>, reference: ProjectRef) -> Self {
        Self { session, reference }
    }

    /// Authenticates and resolves a project in one call.
    pub async fn open(
        client: BcrClient,
        credentials: Credentials,
        name_or_id: &str,
    ) -> Result<Self> {
        let session = Arc::new(Session::authenticate(client, credentials).await?);
        session.project(name_or_id).await
    }

    pub fn id(&self) -> i64 {
        self.reference.id
    }

    pub fn name(&self) -> &str {
        &self.reference.name
    }

    pub fn reference(&self) -> &ProjectRef {
        &self.reference
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn client(&self) -> &BcrClient {
        self.session.client()
    }

    /// `projects/{id}/{suffix}`
    pub fn path(&self, suffix: &str) -> String {
        format!("projects/{}/{}", self.reference.id, suffix.trim_start_matches('/'))
    }

    pub fn queries(&self) -> Queries<'_> {
        Queries::new(self)
    }

    pub fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    pub fn content(&self) -> ContentUploader<'_> {
        ContentUploader::new(self)
    }
}
