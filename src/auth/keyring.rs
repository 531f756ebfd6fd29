//
//  bcr-api
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Token Storage
//!
//! Stores access tokens in the system's native keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: `bcr-api`
//! - **Username/Key**: the lower-cased Brandwatch login
//! - **Password/Value**: the access token
//!
//! When no keyring is available (headless servers, containers), use
//! [`FileCredentialStore`](super::FileCredentialStore) instead.

use anyhow::Result;
use keyring::Entry;

use super::TokenStore;

const SERVICE_NAME: &str = "bcr-api";

pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    fn entry(&self, username: &str) -> Result<Entry> {
        Ok(Entry::new(&self.service, &username.trim().to_lowercase())?)
    }
}

impl TokenStore for KeyringStore {
    fn get(&self, username: &str) -> Result<Option<String>> {
        match self.entry(username)?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, username: &str, token: &str) -> Result<()> {
        self.entry(username)?.set_password(token)?;
        Ok(())
    }

    fn delete(&self, username: &str) -> Result<()> {
        match self.entry(username)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(e.into()),
        }
    }
}
