//! # Service Configuration
//!
//! Explicit startup state: the data directory and both server secrets,
//! loaded once and passed by value into the service. No lazy globals — a
//! service that constructed successfully has its secrets in hand, and a
//! misconfigured secret store fails at startup rather than mid-request.

use std::path::{Path, PathBuf};

use pvw_crypto::{SecretStore, ServerKey, ServerSalt};

use crate::error::ServiceError;

/// Startup configuration for [`crate::WatermarkService`].
#[derive(Debug)]
pub struct ServiceConfig {
    data_dir: PathBuf,
    salt: ServerSalt,
    key: ServerKey,
}

impl ServiceConfig {
    /// Load (or generate) both server secrets under `data_dir`.
    ///
    /// Honors the `PVW_SERVER_SALT` / `PVW_SERVER_KEY` environment
    /// overrides; fails if salt and key resolve to identical bytes.
    pub fn load(data_dir: impl Into<PathBuf>) -> Result<Self, ServiceError> {
        let data_dir = data_dir.into();
        let store = SecretStore::new(&data_dir);
        let (salt, key) = store.load_pair()?;
        Ok(Self {
            data_dir,
            salt,
            key,
        })
    }

    /// Assemble a configuration from already-resolved secrets (tests,
    /// embedders with their own secret management).
    pub fn from_parts(data_dir: impl Into<PathBuf>, salt: ServerSalt, key: ServerKey) -> Self {
        Self {
            data_dir: data_dir.into(),
            salt,
            key,
        }
    }

    /// Directory holding the ledger and persisted secrets.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The derivation salt.
    pub fn salt(&self) -> &ServerSalt {
        &self.salt
    }

    /// Split the configuration into its parts for service construction.
    pub(crate) fn into_parts(self) -> (PathBuf, ServerSalt, ServerKey) {
        (self.data_dir, self.salt, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_generates_secrets_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig::load(dir.path()).unwrap();
        assert_eq!(config.data_dir(), dir.path());
        assert!(dir.path().join(pvw_crypto::secrets::SALT_FILE).exists());
        assert!(dir.path().join(pvw_crypto::secrets::KEY_FILE).exists());
    }

    #[test]
    fn load_is_stable_across_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let first = ServiceConfig::load(dir.path()).unwrap();
        let second = ServiceConfig::load(dir.path()).unwrap();
        assert_eq!(first.salt().as_bytes(), second.salt().as_bytes());
    }
}
