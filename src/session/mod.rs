//
//  bcr-api
//  session/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Session Layer
//!
//! A [`Session`] is an authenticated connection bound to one Brandwatch
//! account. It is created once, never changes afterwards, and hands out
//! project-scoped [`Project`] contexts from which every resource manager is
//! built.
//!
//! ## Flow
//!
//! ```text
//! Credentials ──authenticate──▶ Session ──project(name)──▶ Project ──▶ managers
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bcr_api::api::BcrClient;
//! use bcr_api::auth::Credentials;
//! use bcr_api::session::Session;
//!
//! # async fn run() -> bcr_api::Result<()> {
//! let client = BcrClient::new()?;
//! let creds = Credentials::password("analyst@example.com", "secret");
//!
//! let session = Arc::new(Session::authenticate(client, creds).await?);
//! let project = session.project("Brand Health").await?;
//! println!("Working in project {} ({})", project.name(), project.id());
//! # Ok(())
//! # }
//! ```

mod project;

pub use project::*;

use std::sync::Arc;

use crate::api::common::{ApiError, Page, PageRequest, Result};
use crate::api::BcrClient;
use crate::auth::{
    fetch_current_user, request_token, validate_token, AuthCredential, Credentials, CurrentUser,
};
use crate::config::DEFAULT_PAGE_SIZE;

/// An authenticated connection to the Brandwatch API.
#[derive(Debug)]
pub struct Session {
    client: BcrClient,
    user: CurrentUser,
    page_size: u32,
}

impl Session {
    /// Authenticates and resolves the identity behind the credentials.
    ///
    /// Password credentials are exchanged for an access token first. The
    /// token is then checked with `GET me`; if the credentials name a user,
    /// the token must belong to that user.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Authentication`] for rejected passwords or tokens, a
    ///   malformed token, or a token issued to somebody else.
    /// - [`ApiError::AuthenticationUnavailable`] when the API cannot be
    ///   reached or fails with a server error. The underlying error is kept
    ///   as the source.
    pub async fn authenticate(client: BcrClient, credentials: Credentials) -> Result<Self> {
        let (client, expected_user) = match credentials {
            Credentials::Password { username, password } => {
                let credential = request_token(&client, &username, password.expose())
                    .await
                    .map_err(ApiError::during_authentication)?;
                (client.with_auth(credential), Some(username))
            }
            Credentials::Token { username, token } => {
                if !validate_token(token.expose()) {
                    return Err(ApiError::Authentication("malformed access token".to_string()));
                }
                (client.with_auth(AuthCredential::bearer(token)), username)
            }
        };

        let user = fetch_current_user(&client)
            .await
            .map_err(ApiError::during_authentication)?;

        if let Some(expected) = expected_user {
            if !user.is(&expected) {
                return Err(ApiError::Authentication(format!(
                    "token belongs to {} rather than {}",
                    user.username, expected
                )));
            }
        }

        tracing::info!("Authenticated as {}", user.username);

        Ok(Self {
            client,
            user,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Sets how many results list calls request per page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn client(&self) -> &BcrClient {
        &self.client
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The bearer credential in use, for callers that persist it.
    pub fn credential(&self) -> Option<&AuthCredential> {
        self.client.credential()
    }

    /// Lists every project visible to the authenticated account.
    pub async fn list_projects(&self) -> Result<Vec<ProjectRef>> {
        let mut request = PageRequest::first(self.page_size);
        let mut projects = Vec::new();

        loop {
            let page: Page<ProjectRef> = self.client.get_with_query("projects", &request).await?;
            let more = page.has_next(request);
            projects.extend(page.results);
            if !more {
                break;
            }
            request = request.next();
        }

        Ok(projects)
    }

    /// Resolves a project by name or numeric id.
    ///
    /// Exact name matches win over case-insensitive ones, which win over id
    /// matches.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when nothing matches.
    pub async fn resolve_project(&self, name_or_id: &str) -> Result<ProjectRef> {
        let projects = self.list_projects().await?;
        find_project(projects, name_or_id)
            .ok_or_else(|| ApiError::not_found("project", name_or_id))
    }

    /// Resolves a project and returns a context scoped to it.
    pub async fn project(self: &Arc<Self>, name_or_id: &str) -> Result<Project> {
        let reference = self.resolve_project(name_or_id).await?;
        tracing::debug!("Resolved project '{}' to id {}", reference.name, reference.id);
        Ok(Project::new(Arc::clone(self), reference))
    }
}

fn find_project(projects: Vec<ProjectRef>, name_or_id: &str) -> Option<ProjectRef> {
    let wanted = name_or_id.trim();

    if let Some(index) = projects.iter().position(|p| p.name == wanted) {
        return projects.into_iter().nth(index);
    }

    if let Some(index) = projects
        .iter()
        .position(|p| p.name.eq_ignore_ascii_case(wanted))
    {
        return projects.into_iter().nth(index);
    }

    let id: i64 = wanted.parse().ok()?;
    projects.into_iter().find(|p| p.id == id)
}
