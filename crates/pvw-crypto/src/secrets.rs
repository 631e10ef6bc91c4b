//! # Server Secret Store
//!
//! Sources the two long-lived server secrets: the **salt** (feeds seed
//! derivation and commitment computation) and the **key** (feeds HMAC
//! record signing). Each is sourced in priority order:
//!
//! 1. Environment variable override (64-char hex) — for container
//!    deployments where secrets are injected via environment.
//! 2. Persisted file under the data directory (raw 32 bytes).
//! 3. Freshly generated from the OS CSPRNG and persisted.
//!
//! ## Security Invariants
//!
//! - Salt and key are independent secrets. [`SecretStore::load_pair()`]
//!   refuses to serve if both resolve to the same bytes — a shared value
//!   would let whoever recovers the signing key also forge commitments.
//! - Secret types are zeroized on drop, implement no `Serialize`, and
//!   redact their `Debug` output.
//! - First-use file creation is atomic (`create_new`): under concurrent
//!   startup exactly one writer creates the file and every other process
//!   reads the same bytes back.

use std::path::{Path, PathBuf};

use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// Environment override for the server salt (64 hex chars).
pub const SALT_ENV_VAR: &str = "PVW_SERVER_SALT";
/// Environment override for the server signing key (64 hex chars).
pub const KEY_ENV_VAR: &str = "PVW_SERVER_KEY";

/// Filename of the persisted salt under the data directory.
pub const SALT_FILE: &str = "salt.key";
/// Filename of the persisted signing key under the data directory.
pub const KEY_FILE: &str = "hmac.key";

const SECRET_LEN: usize = 32;

macro_rules! secret_material {
    ($name:ident, $label:literal) => {
        /// 32 bytes of long-lived server secret material.
        ///
        /// Zeroized on drop; never serialized; `Debug` output is redacted.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name([u8; SECRET_LEN]);

        impl $name {
            /// Construct from raw bytes (tests and the secret store).
            pub fn from_bytes(bytes: [u8; SECRET_LEN]) -> Self {
                Self(bytes)
            }

            /// Access the raw secret bytes.
            pub fn as_bytes(&self) -> &[u8; SECRET_LEN] {
                &self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "(<secret>)"))
            }
        }
    };
}

secret_material!(ServerSalt, "ServerSalt");
secret_material!(ServerKey, "ServerKey");

/// Filesystem-backed store for the server salt and signing key.
#[derive(Debug, Clone)]
pub struct SecretStore {
    data_dir: PathBuf,
}

impl SecretStore {
    /// Create a store rooted at the given data directory.
    ///
    /// The directory does not need to exist yet — it is created on the
    /// first secret generation.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory this store reads from and writes to.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolve the server salt (env → file → generate).
    pub fn get_salt(&self) -> Result<ServerSalt, CryptoError> {
        Ok(ServerSalt(self.load_material(SALT_ENV_VAR, SALT_FILE)?))
    }

    /// Resolve the server signing key (env → file → generate).
    pub fn get_key(&self) -> Result<ServerKey, CryptoError> {
        Ok(ServerKey(self.load_material(KEY_ENV_VAR, KEY_FILE)?))
    }

    /// Resolve both secrets, enforcing that they are distinct values.
    pub fn load_pair(&self) -> Result<(ServerSalt, ServerKey), CryptoError> {
        let salt = self.get_salt()?;
        let key = self.get_key()?;
        if bool::from(salt.as_bytes().ct_eq(key.as_bytes())) {
            return Err(CryptoError::SecretStore(
                "server salt and signing key resolve to the same bytes; \
                 they must be independent secrets"
                    .to_string(),
            ));
        }
        Ok((salt, key))
    }

    fn load_material(&self, env_var: &str, file_name: &str) -> Result<[u8; SECRET_LEN], CryptoError> {
        if let Ok(hex) = std::env::var(env_var) {
            return decode_secret_hex(env_var, &hex);
        }

        let path = self.data_dir.join(file_name);
        if path.exists() {
            return read_secret_file(&path);
        }

        std::fs::create_dir_all(&self.data_dir)?;
        let mut fresh = [0u8; SECRET_LEN];
        rand::rngs::OsRng.fill_bytes(&mut fresh);

        // Atomic create-if-absent: create_new fails with AlreadyExists if
        // another process won the race, in which case its bytes are
        // authoritative and ours are discarded.
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        match options.open(&path) {
            Ok(mut f) => {
                use std::io::Write;
                f.write_all(&fresh)?;
                f.sync_all()?;
                Ok(fresh)
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                fresh.zeroize();
                read_secret_file(&path)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn decode_secret_hex(env_var: &str, hex: &str) -> Result<[u8; SECRET_LEN], CryptoError> {
    let bytes = pvw_core::hex_to_bytes(hex.trim()).map_err(CryptoError::HexDecode)?;
    bytes.try_into().map_err(|_| {
        CryptoError::SecretStore(format!(
            "{env_var} must encode {SECRET_LEN} bytes (64 hex chars)"
        ))
    })
}

fn read_secret_file(path: &Path) -> Result<[u8; SECRET_LEN], CryptoError> {
    let bytes = std::fs::read(path)?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        CryptoError::SecretStore(format!(
            "secret file {} must be exactly {SECRET_LEN} bytes, got {}",
            path.display(),
            b.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_and_persists_on_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let store = SecretStore::new(dir.path());
        let salt = store.get_salt().unwrap();
        assert!(dir.path().join(SALT_FILE).exists());

        // Second read returns the persisted bytes, not a fresh secret.
        let again = store.get_salt().unwrap();
        assert_eq!(salt.as_bytes(), again.as_bytes());
    }

    #[test]
    fn salt_and_key_are_distinct_files_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = SecretStore::new(dir.path());
        let (salt, key) = store.load_pair().unwrap();
        assert!(dir.path().join(SALT_FILE).exists());
        assert!(dir.path().join(KEY_FILE).exists());
        assert_ne!(salt.as_bytes(), key.as_bytes());
    }

    #[test]
    fn load_pair_rejects_identical_secrets() {
        let dir = tempfile::tempdir().unwrap();
        let same = [7u8; SECRET_LEN];
        std::fs::write(dir.path().join(SALT_FILE), same).unwrap();
        std::fs::write(dir.path().join(KEY_FILE), same).unwrap();

        let store = SecretStore::new(dir.path());
        let result = store.load_pair();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_truncated_secret_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SALT_FILE), [1u8; 16]).unwrap();
        let store = SecretStore::new(dir.path());
        assert!(store.get_salt().is_err());
    }

    #[test]
    fn creates_nested_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("data");
        let store = SecretStore::new(&nested);
        store.get_key().unwrap();
        assert!(nested.join(KEY_FILE).exists());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let salt = ServerSalt::from_bytes([0xab; SECRET_LEN]);
        let debug = format!("{salt:?}");
        assert_eq!(debug, "ServerSalt(<secret>)");
        assert!(!debug.contains("ab"));
    }

    #[test]
    fn decode_secret_hex_validates_length() {
        assert!(decode_secret_hex("VAR", &"ab".repeat(32)).is_ok());
        assert!(decode_secret_hex("VAR", "abcd").is_err());
        assert!(decode_secret_hex("VAR", "not-hex").is_err());
    }
}
