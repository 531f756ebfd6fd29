//
//  bcr-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Brandwatch Consumer Research API
//!
//! This module provides shared types used by the session layer, the resource
//! managers and the content uploader. It includes error handling, validation
//! error collection and pagination.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all library operations
//! - [`ValidationErrors`] - Every local validation failure for a payload
//! - [`WorkflowStage`] - Which stage of a composite workflow failed
//! - Pagination types (re-exported from [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use bcr_api::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::Authentication(reason)) => println!("Please log in again: {}", reason),
//!         Err(ApiError::NotFound { kind, name }) => println!("No {} named {}", kind, name),
//!         Err(ApiError::Validation(errors)) => println!("Fix these fields: {}", errors),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Result alias used by every library operation.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified error type for Brandwatch API operations.
///
/// The first five variants are the error kinds callers are expected to
/// branch on. The remaining ones describe vendor-side failures that do not
/// fit those kinds.
///
/// # Example
///
/// ```rust
/// use bcr_api::api::common::{ApiError, WorkflowStage};
///
/// let err = ApiError::Workflow {
///     stage: WorkflowStage::Upload,
///     source: Box::new(ApiError::ServerError("boom".to_string())),
/// };
///
/// assert_eq!(err.stage(), Some(WorkflowStage::Upload));
/// assert_eq!(err.to_string(), "upload stage failed: Server error: boom");
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad credentials, expired token, or a token that belongs to someone else.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The service could not be reached, or failed, while authenticating.
    #[error("Authentication failed: service unreachable: {source}")]
    AuthenticationUnavailable {
        #[source]
        source: Box<ApiError>,
    },

    /// A project or resource does not exist for the authenticated identity.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Resource kind, e.g. `query` or `project`.
        kind: &'static str,
        /// The name or id that was looked up.
        name: String,
    },

    /// A payload failed local (or remote query) validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Network failure or timeout while talking to the API.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The account is not allowed to perform the operation.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The API rejected the request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The API failed while handling the request.
    #[error("Server error: {0}")]
    ServerError(String),

    /// The response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A stage of a composite workflow failed.
    #[error("{stage} stage failed: {source}")]
    Workflow {
        /// The stage that failed; later stages were not attempted.
        stage: WorkflowStage,
        /// The underlying failure.
        #[source]
        source: Box<ApiError>,
    },

    /// Anything else the API returned.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Builds a [`ApiError::NotFound`] for a resource kind.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Wraps this error as the failure of a workflow stage.
    pub fn at_stage(self, stage: WorkflowStage) -> Self {
        Self::Workflow {
            stage,
            source: Box::new(self),
        }
    }

    /// Returns the failed workflow stage, if this is a workflow error.
    pub fn stage(&self) -> Option<WorkflowStage> {
        match self {
            Self::Workflow { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Returns the innermost error, looking through workflow wrappers.
    pub fn root(&self) -> &ApiError {
        match self {
            Self::Workflow { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.root(), Self::Validation(_))
    }

    /// True for rejected credentials and for an unreachable service during
    /// authentication.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self.root(),
            Self::Authentication(_) | Self::AuthenticationUnavailable { .. }
        )
    }

    /// True when the credentials themselves were rejected.
    pub fn is_rejected_credentials(&self) -> bool {
        matches!(self.root(), Self::Authentication(_))
    }

    /// Reports network and server failures as an unreachable service.
    /// Every other error is returned unchanged.
    pub fn during_authentication(self) -> Self {
        match self {
            Self::Transport(_) | Self::ServerError(_) => Self::AuthenticationUnavailable {
                source: Box::new(self),
            },
            other => other,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Stages of the query validate -> upload -> backfill workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStage {
    Validate,
    Upload,
    Backfill,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validate => "validate",
            Self::Upload => "upload",
            Self::Backfill => "backfill",
        };
        f.write_str(name)
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted location of the field, e.g. `items[2].date`.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

/// Every validation failure found in a payload.
///
/// Validators push into one of these instead of returning on the first
/// problem, so callers can fix everything in one pass.
///
/// # Example
///
/// ```rust
/// use bcr_api::api::common::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.push("name", "field required");
/// errors.push("language", "ensure this value has at most 2 characters");
///
/// assert_eq!(errors.len(), 2);
/// assert!(errors.into_result().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single-field failure.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Records `field: field required` when `value` is blank.
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "field required");
        }
    }

    /// Appends another set of errors, prefixing each field with `prefix`.
    pub fn extend_prefixed(&mut self, prefix: &str, other: ValidationErrors) {
        for error in other.errors {
            self.errors.push(FieldError {
                field: format!("{}.{}", prefix, error.field),
                message: error.message,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Returns the first error recorded for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display_joins_fields() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "field required");
        errors.push("booleanQuery", "field required");
        assert_eq!(
            errors.to_string(),
            "name: field required; booleanQuery: field required"
        );
    }

    #[test]
    fn test_require_flags_blank_values() {
        let mut errors = ValidationErrors::new();
        errors.require("name", "   ");
        errors.require("title", "present");
        assert_eq!(errors.len(), 1);
        assert!(errors.for_field("name").is_some());
        assert!(errors.for_field("title").is_none());
    }

    #[test]
    fn test_extend_prefixed() {
        let mut outer = ValidationErrors::new();
        outer.extend_prefixed("items[3]", ValidationErrors::single("date", "bad date"));
        assert_eq!(outer.iter().next().unwrap().field, "items[3].date");
    }

    #[test]
    fn test_root_looks_through_workflow() {
        let err = ApiError::not_found("query", "brand").at_stage(WorkflowStage::Backfill);
        assert!(err.is_not_found());
        assert_eq!(err.stage(), Some(WorkflowStage::Backfill));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_server_failure_during_authentication() {
        let err = ApiError::ServerError("maintenance".to_string()).during_authentication();
        assert!(err.is_authentication());
        assert!(!err.is_rejected_credentials());
        assert_eq!(
            err.to_string(),
            "Authentication failed: service unreachable: Server error: maintenance"
        );

        let rejected = ApiError::Authentication("bad".to_string()).during_authentication();
        assert!(rejected.is_rejected_credentials());
    }
}
