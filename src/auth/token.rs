//
//  bcr-api
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Acquisition
//!
//! Brandwatch issues access tokens through a password grant on the
//! `oauth/token` endpoint:
//!
//! ```text
//! POST oauth/token?username=<login>&grant_type=api-password&client_id=brandwatch-api-client
//! Content-Type: application/x-www-form-urlencoded
//!
//! password=<password>
//! ```
//!
//! The token is then used as a bearer token. `GET me` returns the identity
//! behind a token and doubles as the token validity check.

use anyhow::Result as AnyResult;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::AuthCredential;
use crate::api::common::{ApiError, Result};
use crate::api::BcrClient;

/// OAuth client id the API expects for password grants.
pub const CLIENT_ID: &str = "brandwatch-api-client";

/// Grant type for username/password exchange.
pub const GRANT_TYPE: &str = "api-password";

/// Reads a token from standard input.
///
/// Only the first line is read; surrounding whitespace is trimmed. Works
/// with piped input: `echo "$TOKEN" | bcr auth login --with-token`.
pub fn read_token_from_stdin() -> AnyResult<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Validates the format of a token string.
///
/// Only checks the shape; use [`fetch_current_user`] to check the token
/// against the API.
///
/// ```rust
/// use bcr_api::auth::validate_token;
///
/// assert!(validate_token("00000000-aaaa-bbbb-cccc-000000000000"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,

    #[serde(default)]
    expires_in: Option<i64>,
}

/// The identity behind an access token, as returned by `GET me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Numeric account id.
    #[serde(default)]
    pub id: Option<i64>,

    /// Login name (usually an email address).
    pub username: String,

    #[serde(default, rename = "firstName")]
    pub first_name: Option<String>,

    #[serde(default, rename = "lastName")]
    pub last_name: Option<String>,
}

impl CurrentUser {
    /// True when `username` names this user (logins are case-insensitive).
    pub fn is(&self, username: &str) -> bool {
        self.username.eq_ignore_ascii_case(username.trim())
    }
}

/// Exchanges a username and password for an access token.
///
/// The token endpoint answers bad credentials with 400 or 401; both are
/// reported as [`ApiError::Authentication`].
pub async fn request_token(
    client: &BcrClient,
    username: &str,
    password: &str,
) -> Result<AuthCredential> {
    let query = [
        ("username", username),
        ("grant_type", GRANT_TYPE),
        ("client_id", CLIENT_ID),
    ];
    let form = [("password", password)];

    let response: TokenResponse = client
        .post_form("oauth/token", &query, &form)
        .await
        .map_err(|e| match e {
            ApiError::BadRequest(message) | ApiError::Authentication(message) => {
                ApiError::Authentication(message)
            }
            other => other,
        })?;

    if !validate_token(&response.access_token) {
        return Err(ApiError::Authentication(
            "token endpoint returned a malformed token".to_string(),
        ));
    }

    let mut credential = AuthCredential::bearer(response.access_token);
    if let Some(secs) = response.expires_in {
        credential = credential.expiring_at(Utc::now() + Duration::seconds(secs));
    }

    tracing::debug!("Obtained access token for {}", username);
    Ok(credential)
}

/// Returns the identity behind the client's bearer token.
///
/// An unauthenticated client or a rejected token yields
/// [`ApiError::Authentication`].
pub async fn fetch_current_user(client: &BcrClient) -> Result<CurrentUser> {
    if !client.is_authenticated() {
        return Err(ApiError::Authentication("no access token".to_string()));
    }

    client.get("me").await
}
