//
//  bcr-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Brandwatch Consumer Research API Client
//!
//! A typed client for the Brandwatch Consumer Research REST API, plus the
//! `bcr` command-line tool built on top of it.
//!
//! ## Overview
//!
//! The library is organised in two layers:
//!
//! - a **session layer** that authenticates once and resolves the project
//!   every later call is scoped to, and
//! - **resource managers** (queries, groups, tags, categories) that hide
//!   vendor ids behind names, validate payloads before sending them, and
//!   run multi-step workflows such as validate, upload and backfill as one
//!   call.
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client, error kinds and pagination envelope
//! - [`auth`]: credentials, token exchange and token storage
//! - [`session`]: authenticated sessions and project scoping
//! - [`resources`]: resource managers and the name to id cache
//! - [`upload`]: custom content validation and upload
//! - [`config`]: configuration file management
//! - [`cli`]: the `bcr` command definitions
//! - [`output`], [`interactive`], [`util`]: terminal helpers for the binary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bcr_api::api::BcrClient;
//! use bcr_api::auth::Credentials;
//! use bcr_api::resources::{DateRange, QueryDraft};
//! use bcr_api::session::Project;
//! use chrono::NaiveDate;
//!
//! # async fn run() -> bcr_api::Result<()> {
//! let project = Project::open(
//!     BcrClient::new()?,
//!     Credentials::password("analyst@example.com", "hunter2"),
//!     "Brand Health",
//! )
//! .await?;
//!
//! let draft = QueryDraft::new("Acme mentions", "acme OR \"acme corp\"");
//! let since = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! project
//!     .queries()
//!     .upload_and_backfill(&draft, &DateRange::since(since))
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// HTTP client, error kinds and shared response types.
pub mod api;

/// Credentials, the token endpoint and token storage.
///
/// Tokens can be kept in the system keychain or in the plain
/// `~/.bcr/credentials.txt` file.
pub mod auth;

/// Command-line interface definitions for the `bcr` binary.
pub mod cli;

/// Configuration file management.
///
/// - Linux: `~/.config/bcr/config.toml`
/// - macOS: `~/Library/Application Support/bcr/config.toml`
/// - Windows: `%APPDATA%\bcr\config.toml`
pub mod config;

/// Interactive prompts and selectors.
pub mod interactive;

/// Table and JSON output for the binary.
pub mod output;

/// Resource managers for queries, groups, tags and categories.
pub mod resources;

/// Authenticated sessions and project-scoped contexts.
pub mod session;

/// Custom content upload.
pub mod upload;

/// Utility functions.
pub mod util;

pub use api::common::{ApiError, Result, ValidationErrors, WorkflowStage};
pub use api::BcrClient;
pub use auth::Credentials;
pub use cli::Cli;
pub use config::Config;
pub use session::{Project, Session};

/// Application name, used for the binary and the configuration directory.
pub const APP_NAME: &str = "bcr";

/// Crate version from Cargo.toml.
///
/// ```rust
/// use bcr_api::VERSION;
///
/// println!("bcr version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the `bcr` binary.
///
/// - `0`: Success
/// - `1-3`: General errors, usage and validation
/// - `4-7`: Authentication
/// - `8-15`: Missing resources
/// - `16-31`: Cancelled operations
/// - `32+`: The remote service
pub mod exit_codes {
    /// The command completed without errors.
    pub const SUCCESS: i32 = 0;

    /// An unspecified error; details are on stderr.
    pub const ERROR: i32 = 1;

    /// Invalid arguments or options.
    pub const USAGE: i32 = 2;

    /// A payload failed validation. Nothing was sent for the failing stage.
    pub const VALIDATION: i32 = 3;

    /// Not logged in, or the credentials were rejected.
    /// Run `bcr auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// The project or resource does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The user declined a confirmation prompt.
    pub const CANCELLED: i32 = 16;

    /// The API failed or could not be reached.
    pub const SERVICE_ERROR: i32 = 32;
}
