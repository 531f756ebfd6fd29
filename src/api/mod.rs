//
//  bcr-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP plumbing shared by the session layer and
//! the resource managers.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with authentication and request handling
//! - [`common`]: Shared types (errors, validation errors, pagination)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bcr_api::api::BcrClient;
//!
//! // Public endpoint
//! let client = BcrClient::new().expect("Failed to create client");
//!
//! // Custom endpoint, e.g. a corporate proxy
//! let proxied = BcrClient::with_base_url("https://bcr-proxy.example.com/")
//!     .expect("Failed to create client");
//! ```
//!
//! ## Error Handling
//!
//! Failed responses are returned as [`ApiError`] variants:
//!
//! - `Authentication`: 401 Unauthorized
//! - `Forbidden`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `BadRequest`: 400 / 422
//! - `ServerError`: 5xx Server Errors
//! - `Transport`: connection failures and timeouts

/// Core HTTP client wrapper for the Brandwatch API.
pub mod client;

/// Common types shared by every layer.
///
/// Includes:
/// - [`ApiError`]: Standardized error type
/// - [`common::ValidationErrors`]: Field-level validation failures
/// - [`common::Page`]: Pagination envelope
pub mod common;

pub use client::{BcrClient, DEFAULT_API_URL};

pub use common::{ApiError, Result};
