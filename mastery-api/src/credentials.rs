//! Client-side credential storage.
//!
//! The access and refresh credentials live under two fixed keys. Everything
//! that talks to the service reads them through [`CredentialStore`], so the
//! terminal front-end can persist them to disk while tests keep them in
//! memory.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

/// Storage key of the short-lived bearer credential.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key of the longer-lived refresh credential.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("credential storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("credential storage unavailable: {0}")]
    Unavailable(String),
}

/// Key/value storage for the credential pair.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError>;

    /// Removing a key that is not present is not an error.
    fn remove(&self, key: &str) -> Result<(), CredentialError>;

    fn access_token(&self) -> Result<Option<String>, CredentialError> {
        self.get(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Result<Option<String>, CredentialError> {
        self.get(REFRESH_TOKEN_KEY)
    }

    fn store_pair(&self, access_token: &str, refresh_token: &str) -> Result<(), CredentialError> {
        self.set(ACCESS_TOKEN_KEY, access_token)?;
        self.set(REFRESH_TOKEN_KEY, refresh_token)
    }

    /// Remove both credentials. Both removals are attempted even if the
    /// first one fails; the first error is returned.
    fn clear(&self) -> Result<(), CredentialError> {
        let access = self.remove(ACCESS_TOKEN_KEY);
        let refresh = self.remove(REFRESH_TOKEN_KEY);
        access.and(refresh)
    }
}

/// Credential store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a store that already holds a session.
    pub fn with_pair(access_token: &str, refresh_token: &str) -> Self {
        let store = Self::new();
        {
            let mut entries = store.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.insert(ACCESS_TOKEN_KEY.to_string(), access_token.to_string());
            entries.insert(REFRESH_TOKEN_KEY.to_string(), refresh_token.to_string());
        }
        store
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
