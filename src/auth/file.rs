//
//  bcr-api
//  auth/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Plain-file token storage.
//!
//! Tokens live in `~/.bcr/credentials.txt`, one `username:token` pair per
//! line. Usernames are stored lower-cased. On unix the file is restricted to
//! its owner (mode 0600); prefer the keyring where one exists.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use super::TokenStore;

/// Default credentials file, relative to the home directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = ".bcr/credentials.txt";

/// Returns `~/.bcr/credentials.txt`.
pub fn default_credentials_path() -> Result<PathBuf> {
    let dirs = BaseDirs::new().context("Could not determine home directory")?;
    Ok(dirs.home_dir().join(DEFAULT_CREDENTIALS_FILE))
}

pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store backed by [`default_credentials_path`].
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(default_credentials_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Vec<(String, String)>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        // Skip lines without a separator instead of failing the whole file.
        Ok(content
            .lines()
            .filter_map(|line| {
                let (user, token) = line.trim().split_once(':')?;
                Some((user.trim().to_lowercase(), token.trim().to_string()))
            })
            .collect())
    }

    fn write_entries(&self, entries: &[(String, String)]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content: String = entries
            .iter()
            .map(|(user, token)| format!("{}:{}\n", user, token))
            .collect();

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .with_context(|| format!("Failed to restrict {}", self.path.display()))?;
        }

        Ok(())
    }
}

impl TokenStore for FileCredentialStore {
    fn get(&self, username: &str) -> Result<Option<String>> {
        let key = username.trim().to_lowercase();
        Ok(self
            .read_entries()?
            .into_iter()
            .find(|(user, _)| *user == key)
            .map(|(_, token)| token))
    }

    fn store(&self, username: &str, token: &str) -> Result<()> {
        let key = username.trim().to_lowercase();
        let mut entries = self.read_entries()?;
        entries.retain(|(user, _)| *user != key);
        entries.push((key, token.to_string()));
        self.write_entries(&entries)
    }

    fn delete(&self, username: &str) -> Result<()> {
        let key = username.trim().to_lowercase();
        let mut entries = self.read_entries()?;
        let before = entries.len();
        entries.retain(|(user, _)| *user != key);
        if entries.len() != before {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}
