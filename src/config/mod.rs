//
//  bcr-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loading, saving, and accessing settings stored in a TOML file in the
//! platform-specific configuration directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bcr/config.toml`
//! - **macOS**: `~/Library/Application Support/bcr/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bcr\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://api.brandwatch.com/"
//! timeout_secs = 60
//! page_size = 100
//!
//! [session]
//! username = "analyst@example.com"
//! default_project = "Brand Health"
//! token_store = "keyring"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bcr_api::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("session.default_project", "Brand Health")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::auth::{FileCredentialStore, KeyringStore, TokenStore};
use crate::util::expand_home;

/// Default number of results requested per page when listing.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "api.page_size",
    "session.username",
    "session.default_project",
    "session.token_store",
    "session.credentials_path",
];

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Results requested per page when listing resources.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

/// Where access tokens are kept between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    #[default]
    Keyring,
    File,
}

impl std::str::FromStr for TokenStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "keyring" => Ok(Self::Keyring),
            "file" => Ok(Self::File),
            other => anyhow::bail!("Unknown token store '{}'. Use 'keyring' or 'file'.", other),
        }
    }
}

impl std::fmt::Display for TokenStoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyring => f.write_str("keyring"),
            Self::File => f.write_str("file"),
        }
    }
}

/// Identity settings remembered by `bcr auth login`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub default_project: Option<String>,

    #[serde(default)]
    pub token_store: TokenStoreKind,

    /// Overrides `~/.bcr/credentials.txt` for the file store.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Opens the token store selected by `session.token_store`.
    pub fn token_store(&self) -> Result<Box<dyn TokenStore>> {
        match self.session.token_store {
            TokenStoreKind::Keyring => Ok(Box::new(KeyringStore::new())),
            TokenStoreKind::File => match &self.session.credentials_path {
                Some(path) => Ok(Box::new(FileCredentialStore::new(expand_home(path)))),
                None => Ok(Box::new(FileCredentialStore::default_location()?)),
            },
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.timeout_secs" => Some(self.api.timeout_secs.to_string()),
            "api.page_size" => Some(self.api.page_size.to_string()),
            "session.username" => self.session.username.clone(),
            "session.default_project" => self.session.default_project.clone(),
            "session.token_store" => Some(self.session.token_store.to_string()),
            "session.credentials_path" => self
                .session
                .credentials_path
                .as_ref()
                .map(|p| p.display().to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                url::Url::parse(value)
                    .map_err(|e| anyhow::anyhow!("Invalid URL '{}': {}", value, e))?;
                self.api.base_url = value.to_string();
            }
            "api.timeout_secs" => {
                self.api.timeout_secs = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("timeout_secs must be a whole number"))?;
            }
            "api.page_size" => {
                let size: u32 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("page_size must be a whole number"))?;
                if size == 0 {
                    anyhow::bail!("page_size must be at least 1");
                }
                self.api.page_size = size;
            }
            "session.username" => self.session.username = Some(value.to_string()),
            "session.default_project" => self.session.default_project = Some(value.to_string()),
            "session.token_store" => self.session.token_store = value.parse()?,
            "session.credentials_path" => {
                self.session.credentials_path = Some(PathBuf::from(value))
            }
            _ => anyhow::bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Resets a key to its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "api.base_url" => self.api.base_url = default_base_url(),
            "api.timeout_secs" => self.api.timeout_secs = default_timeout_secs(),
            "api.page_size" => self.api.page_size = default_page_size(),
            "session.username" => self.session.username = None,
            "session.default_project" => self.session.default_project = None,
            "session.token_store" => self.session.token_store = TokenStoreKind::default(),
            "session.credentials_path" => self.session.credentials_path = None,
            _ => anyhow::bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.session.token_store, TokenStoreKind::Keyring);
        assert!(config.session.username.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            "[session]\nusername = \"me@example.com\"\ntoken_store = \"file\"\n",
        )
        .unwrap();
        assert_eq!(config.session.username.as_deref(), Some("me@example.com"));
        assert_eq!(config.session.token_store, TokenStoreKind::File);
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("session.default_project", "Brand Health").unwrap();
        config.set("api.page_size", "25").unwrap();
        assert_eq!(
            config.get("session.default_project").as_deref(),
            Some("Brand Health")
        );
        assert_eq!(config.get("api.page_size").as_deref(), Some("25"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("api.page_size", "0").is_err());
        assert!(config.set("api.base_url", "nope").is_err());
        assert!(config.set("session.token_store", "vault").is_err());
        assert!(config.set("no.such.key", "x").is_err());
    }

    #[test]
    fn test_unset_restores_defaults() {
        let mut config = Config::default();
        config.set("api.page_size", "10").unwrap();
        config.set("session.default_project", "p").unwrap();
        config.unset("api.page_size").unwrap();
        config.unset("session.default_project").unwrap();
        assert_eq!(config.api.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.session.default_project.is_none());
        assert!(config.unset("core.editor").is_err());
    }

    #[test]
    fn test_every_key_is_readable() {
        let mut config = Config::default();
        config.set("session.username", "me@example.com").unwrap();
        config.set("session.default_project", "p").unwrap();
        config.set("session.credentials_path", "/tmp/creds.txt").unwrap();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "missing value for {}", key);
        }
    }
}
