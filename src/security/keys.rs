//! Per-account data key derivation.
//!
//! Each account gets one symmetric key at registration, derived with scrypt
//! from the registration password and a fresh random salt. The salt is
//! discarded, so the key cannot be re-derived later; it is stored URL-safe
//! base64 encoded next to the account and never rotated.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use scrypt::{scrypt, Params};
use std::fmt;

use crate::errors::DomainError;

/// Salt length in bytes
pub const SALT_LEN: usize = 32;

/// scrypt CPU/memory cost as a power of two (N = 2^14)
pub const SCRYPT_LOG_N: u8 = 14;

/// scrypt block size
pub const SCRYPT_R: u32 = 8;

/// scrypt parallelism
pub const SCRYPT_P: u32 = 1;

/// Derived key length in bytes
pub const KEY_LEN: usize = 32;

/// Encoded symmetric key owned by a single account.
#[derive(Clone, PartialEq, Eq)]
pub struct DataKey(String);

impl DataKey {
    /// Derive a new key from `secret` using a freshly generated salt.
    pub fn derive(secret: &str) -> Self {
        Self::derive_with_salt(secret, &generate_salt())
    }

    /// Deterministic derivation for a known `(secret, salt)` pair.
    pub fn derive_with_salt(secret: &str, salt: &[u8]) -> Self {
        let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
            .expect("scrypt parameters are valid");

        let mut key = [0u8; KEY_LEN];
        scrypt(secret.as_bytes(), salt, &params, &mut key)
            .expect("scrypt output length matches KEY_LEN");

        DataKey(URL_SAFE.encode(key))
    }

    /// Rebuild a key from its stored encoding.
    pub fn from_encoded(encoded: impl Into<String>) -> Result<Self, DomainError> {
        let key = DataKey(encoded.into());
        key.key_bytes()?;
        Ok(key)
    }

    pub fn as_encoded(&self) -> &str {
        &self.0
    }

    pub(crate) fn key_bytes(&self) -> Result<[u8; KEY_LEN], DomainError> {
        let raw = URL_SAFE
            .decode(self.0.as_bytes())
            .map_err(|_| DomainError::InvalidKey)?;

        raw.try_into().map_err(|_| DomainError::InvalidKey)
    }
}

impl fmt::Debug for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DataKey(<redacted>)")
    }
}

fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
