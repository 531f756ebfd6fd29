//
//  bcr-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module holds the credential types used to open a session against
//! the Brandwatch Consumer Research API, and the stores used to keep an
//! access token between runs.
//!
//! ## Supported Credentials
//!
//! - **Username and password**: exchanged once for an access token at the
//!   `oauth/token` endpoint.
//! - **Access token**: used directly as a bearer token, optionally tied to
//!   the username it was issued for.
//!
//! ## Module Structure
//!
//! - [`token`]: Token acquisition and identity lookup
//! - [`keyring`]: Token storage in the system keyring
//! - [`file`]: Token storage in the plain credentials file (`~/.bcr/credentials.txt`)
//!
//! ## Example
//!
//! ```rust
//! use bcr_api::auth::Credentials;
//!
//! let creds = Credentials::password("analyst@example.com", "hunter2");
//! assert_eq!(creds.username(), Some("analyst@example.com"));
//!
//! // Secrets never show up in debug output
//! assert!(!format!("{:?}", creds).contains("hunter2"));
//! ```

mod file;
mod keyring;
mod token;

pub use file::*;
pub use keyring::*;
pub use token::*;

use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;

/// An opaque secret string (password or access token).
///
/// `Debug` and `Display` never print the value; call
/// [`expose`](Self::expose) where the raw string is genuinely needed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// What a caller supplies to open a session.
///
/// # Variants
///
/// - `Password`: exchanged for an access token during authentication.
/// - `Token`: an access token obtained earlier. When `username` is set,
///   authentication also checks that the token belongs to that user.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Username and password for the token endpoint.
    Password {
        /// The Brandwatch login (usually an email address).
        username: String,
        /// The account password.
        password: Secret,
    },
    /// A previously issued access token.
    Token {
        /// The login the token was issued for, if known.
        username: Option<String>,
        /// The access token.
        token: Secret,
    },
}

impl Credentials {
    pub fn password(username: impl Into<String>, password: impl Into<Secret>) -> Self {
        Self::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn token(token: impl Into<Secret>) -> Self {
        Self::Token {
            username: None,
            token: token.into(),
        }
    }

    pub fn token_for(username: impl Into<String>, token: impl Into<Secret>) -> Self {
        Self::Token {
            username: Some(username.into()),
            token: token.into(),
        }
    }

    /// Looks up a stored token for `username`.
    ///
    /// Returns `Ok(None)` when the store has nothing for that user.
    pub fn from_store(store: &dyn TokenStore, username: &str) -> anyhow::Result<Option<Self>> {
        Ok(store
            .get(username)?
            .map(|token| Self::token_for(username, token)))
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Password { username, .. } => Some(username),
            Self::Token { username, .. } => username.as_deref(),
        }
    }
}

/// A resolved bearer credential attached to every authenticated request.
///
/// # Example
///
/// ```rust
/// use bcr_api::auth::AuthCredential;
/// use chrono::{Duration, Utc};
///
/// let fresh = AuthCredential::bearer("token");
/// assert!(!fresh.is_expired());
///
/// let stale = AuthCredential::bearer("token").expiring_at(Utc::now() - Duration::hours(1));
/// assert!(stale.is_expired());
/// ```
#[derive(Debug, Clone)]
pub struct AuthCredential {
    /// The bearer token.
    pub access_token: Secret,
    /// When the token expires, if the token endpoint said so.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthCredential {
    pub fn bearer(token: impl Into<Secret>) -> Self {
        Self {
            access_token: token.into(),
            expires_at: None,
        }
    }

    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Adds the `Authorization: Bearer` header to a request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.access_token.expose())
    }

    /// Tokens without an expiry never expire from the client's point of view.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(exp) => exp < Utc::now(),
            None => false,
        }
    }
}

/// Persistent storage for access tokens, keyed by username.
///
/// Usernames are matched case-insensitively by every implementation.
pub trait TokenStore {
    fn get(&self, username: &str) -> anyhow::Result<Option<String>>;

    fn store(&self, username: &str, token: &str) -> anyhow::Result<()>;

    fn delete(&self, username: &str) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_redacted() {
        let secret = Secret::new("top-secret");
        assert_eq!(format!("{:?}", secret), "Secret(****)");
        assert_eq!(secret.to_string(), "****");
        assert_eq!(secret.expose(), "top-secret");
    }

    #[test]
    fn test_token_credentials_username() {
        assert_eq!(Credentials::token("abc").username(), None);
        assert_eq!(
            Credentials::token_for("me@example.com", "abc").username(),
            Some("me@example.com")
        );
    }
}
