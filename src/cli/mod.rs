//
//  bcr-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod category;
mod completion;
mod config;
mod content;
mod group;
mod project;
mod query;
mod tag;

pub use auth::AuthCommand;
pub use category::CategoryCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use content::ContentCommand;
pub use group::GroupCommand;
pub use project::ProjectCommand;
pub use query::QueryCommand;
pub use tag::TagCommand;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::common::ApiError;
use crate::api::BcrClient;
use crate::auth::Credentials;
use crate::config::Config;
use crate::interactive::{is_interactive, prompt_confirm_with_default};
use crate::output::{OutputFormat, OutputWriter};
use crate::session::{Project, Session};

/// Brandwatch Consumer Research CLI - work with projects, queries and
/// uploads from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bcr",
    version,
    about = "Work with Brandwatch Consumer Research from the command line",
    long_about = "bcr is a CLI for the Brandwatch Consumer Research API.\n\n\
                  It manages queries, query groups, tags, categories and custom content\n\
                  in a project without dealing with vendor ids.",
    propagate_version = true,
    after_help = "Use 'bcr <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Project name or id (defaults to session.default_project)
    #[arg(long, short = 'p', global = true, env = "BCR_PROJECT")]
    pub project: Option<String>,

    /// Brandwatch username (defaults to session.username)
    #[arg(long, short = 'u', global = true, env = "BCR_USERNAME")]
    pub username: Option<String>,

    /// API root URL (defaults to api.base_url)
    #[arg(long, global = true, env = "BCR_API_URL")]
    pub api_url: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, log out and check credentials
    Auth(AuthCommand),

    /// List and inspect projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// Manage search queries
    #[command(visible_alias = "q")]
    Query(QueryCommand),

    /// Manage query groups
    Group(GroupCommand),

    /// Manage tags
    Tag(TagCommand),

    /// Manage categories
    Category(CategoryCommand),

    /// Upload custom content
    Content(ContentCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// The user declined a confirmation prompt.
#[derive(Debug, thiserror::Error)]
#[error("Operation cancelled")]
pub struct Cancelled;

impl GlobalOptions {
    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }

    /// Configuration with command-line overrides applied.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load().context("Failed to load configuration")?;
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(username) = &self.username {
            config.session.username = Some(username.clone());
        }
        if let Some(project) = &self.project {
            config.session.default_project = Some(project.clone());
        }
        Ok(config)
    }
}

fn not_logged_in(detail: &str) -> anyhow::Error {
    ApiError::Authentication(format!("{}. Run 'bcr auth login' to authenticate", detail)).into()
}

/// Authenticates with the stored token for the configured user.
pub(crate) async fn connect(config: &Config) -> Result<Arc<Session>> {
    let username = config
        .session
        .username
        .as_deref()
        .ok_or_else(|| not_logged_in("No username configured"))?;

    let store = config.token_store()?;
    let credentials = Credentials::from_store(store.as_ref(), username)?
        .ok_or_else(|| not_logged_in(&format!("No token stored for {}", username)))?;

    let client = BcrClient::from_config(&config.api)?;
    let session = Session::authenticate(client, credentials)
        .await?
        .with_page_size(config.api.page_size);
    Ok(Arc::new(session))
}

/// Authenticates and resolves the selected project.
pub(crate) async fn open_project(config: &Config) -> Result<Project> {
    let name = config.session.default_project.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "No project selected. Pass --project or run 'bcr config set session.default_project <NAME>'"
        )
    })?;

    let session = connect(config).await?;
    Ok(session.project(&name).await?)
}

/// Asks before a destructive operation unless `--yes` was given.
pub(crate) fn confirm(message: &str, yes: bool) -> Result<()> {
    if yes {
        return Ok(());
    }
    if !is_interactive() {
        anyhow::bail!("Refusing to continue without --yes in a non-interactive session");
    }
    if prompt_confirm_with_default(message, false)? {
        Ok(())
    } else {
        Err(Cancelled.into())
    }
}

/// Reads a JSON document from a file, or from stdin when `path` is `-`.
pub(crate) fn read_json_file<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let text = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}
