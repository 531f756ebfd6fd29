//
//  bcr-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Brandwatch API
//!
//! This module provides the core HTTP client used by every other layer of
//! the library. It handles base-URL resolution, bearer authentication,
//! request/response serialization and mapping of HTTP failures onto
//! [`ApiError`] kinds.
//!
//! ## Features
//!
//! - Configurable base URL (for proxies and test servers)
//! - Bearer token injection once a session is established
//! - JSON serialization/deserialization, tolerant of empty bodies
//! - Status-code to error-kind mapping with vendor messages extracted
//! - Custom User-Agent header and request timeout

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::common::{ApiError, Result};
use crate::auth::AuthCredential;
use crate::config::ApiConfig;

/// Default root of the Brandwatch REST API.
pub const DEFAULT_API_URL: &str = "https://api.brandwatch.com/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Extracts a human-readable message from a Brandwatch error body.
///
/// The API uses a few shapes depending on the endpoint:
///
/// ```json
/// {"errors": [{"code": 404, "message": "Query not found"}]}
/// {"error": "invalid_grant", "error_description": "Bad credentials"}
/// {"message": "Something went wrong"}
/// ```
///
/// Falls back to the raw body (or the status text for empty bodies).
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|arr| arr.first())
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }

        // OAuth format
        if let Some(description) = json.get("error_description").and_then(|m| m.as_str()) {
            return description.to_string();
        }

        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }

        if let Some(error) = json.get("error").and_then(|m| m.as_str()) {
            return error.to_string();
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()
    } else {
        body.trim().to_string()
    }
}

/// Maps a failed response onto an [`ApiError`] kind.
///
/// `path` is used as the name in [`ApiError::NotFound`] so that resource
/// managers can re-label it with a resource kind.
pub fn format_api_error(status: StatusCode, path: &str, body: &str) -> ApiError {
    let message = extract_error_message(status, body);

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Authentication(message),
        StatusCode::FORBIDDEN => ApiError::Forbidden(message),
        StatusCode::NOT_FOUND => ApiError::not_found("resource", path),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::BadRequest(message)
        }
        s if s.is_server_error() => ApiError::ServerError(message),
        _ => ApiError::Unknown(format!("API error ({}): {}", status, message)),
    }
}

/// HTTP client for the Brandwatch Consumer Research API.
///
/// A client without credentials can only reach the token endpoint; the
/// session layer attaches the bearer token with [`with_auth`](Self::with_auth)
/// once authentication succeeds.
///
/// # Example
///
/// ```rust,no_run
/// use bcr_api::api::BcrClient;
///
/// # async fn run() -> bcr_api::Result<()> {
/// let client = BcrClient::new()?;
/// let me: serde_json::Value = client.get("me").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BcrClient {
    http: Client,
    base_url: Url,
    auth: Option<AuthCredential>,
}

impl BcrClient {
    /// Creates a client for the public API endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Creates a client rooted at `base_url`.
    ///
    /// A trailing slash is added when missing so that relative paths join
    /// underneath the base instead of replacing its last segment.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::build(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client from the `[api]` section of the configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::build(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn build(base_url: &str, timeout: Duration) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized)
            .map_err(|e| ApiError::BadRequest(format!("invalid API url '{}': {}", base_url, e)))?;

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
                .timeout(timeout)
                .build()?,
            base_url,
            auth: None,
        })
    }

    /// Attaches a bearer credential to every subsequent request.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn credential(&self) -> Option<&AuthCredential> {
        self.auth.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` (relative, no leading slash required) against the base URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::BadRequest(format!("invalid path '{}': {}", path, e)))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }
        Ok(request)
    }

    /// Sends a request and decodes the JSON body.
    ///
    /// Empty bodies decode as JSON `null`, so `T = ()` and
    /// `T = serde_json::Value` both work for endpoints that return nothing.
    async fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!("API error: {} - {}", status, extract_error_message(status, &text));
            return Err(format_api_error(status, path, &text));
        }

        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path)?;
        self.send(path, request).await
    }

    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let request = self.request(Method::GET, path)?.query(query);
        self.send(path, request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(path, request).await
    }

    /// Posts a URL-encoded form with extra query parameters (token endpoint).
    pub async fn post_form<T, Q, F>(&self, path: &str, query: &Q, form: &F) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        F: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.query(query).form(form);
        self.send(path, request).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send(path, request).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.request(Method::DELETE, path)?;
        let _: serde_json::Value = self.send(path, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_errors_array() {
        let body = r#"{"errors": [{"code": 404, "message": "Query not found"}]}"#;
        assert_eq!(
            extract_error_message(StatusCode::NOT_FOUND, body),
            "Query not found"
        );
    }

    #[test]
    fn test_extract_oauth_description() {
        let body = r#"{"error": "invalid_grant", "error_description": "Bad credentials"}"#;
        assert_eq!(
            extract_error_message(StatusCode::BAD_REQUEST, body),
            "Bad credentials"
        );
    }

    #[test]
    fn test_extract_falls_back_to_body_and_reason() {
        assert_eq!(
            extract_error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            extract_error_message(StatusCode::BAD_GATEWAY, ""),
            "Bad Gateway"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            format_api_error(StatusCode::UNAUTHORIZED, "me", ""),
            ApiError::Authentication(_)
        ));
        assert!(matches!(
            format_api_error(StatusCode::NOT_FOUND, "projects/1/queries/9", ""),
            ApiError::NotFound { kind: "resource", .. }
        ));
        assert!(matches!(
            format_api_error(StatusCode::UNPROCESSABLE_ENTITY, "x", "{}"),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            format_api_error(StatusCode::SERVICE_UNAVAILABLE, "x", ""),
            ApiError::ServerError(_)
        ));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = BcrClient::with_base_url("http://localhost:1234/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:1234/api/");
        assert_eq!(
            client.url("/projects/12/queries").unwrap().as_str(),
            "http://localhost:1234/api/projects/12/queries"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(BcrClient::with_base_url("not a url").is_err());
    }
}
