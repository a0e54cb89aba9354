//! Field-level authenticated encryption.
//!
//! A sealed field is a URL-safe base64 token laid out as
//!
//! ```text
//! version (1) | issued_at unix seconds, big endian (8) | nonce (12) | ciphertext + tag
//! ```
//!
//! The version byte and timestamp are bound as associated data, so altering
//! any part of the token fails authentication.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::security::keys::DataKey;

pub const TOKEN_VERSION: u8 = 0x80;
pub const NONCE_LEN: usize = 12;
const HEADER_LEN: usize = 1 + 8;
const TAG_LEN: usize = 16;

/// Ciphertext of a single account field, as stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedField(String);

impl EncryptedField {
    pub fn from_stored(token: impl Into<String>) -> Self {
        EncryptedField(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Seal `plaintext` under `key`. Every call uses a fresh nonce and timestamp.
pub fn encrypt(plaintext: &str, key: &DataKey) -> Result<EncryptedField, DomainError> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    seal(plaintext, key, Utc::now().timestamp(), &nonce)
}

/// Open a field sealed by [`encrypt`]. Any mismatch is reported as
/// [`DomainError::Authentication`] without further detail.
pub fn decrypt(field: &EncryptedField, key: &DataKey) -> Result<String, DomainError> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key.key_bytes()?));

    let raw = URL_SAFE
        .decode(field.0.as_bytes())
        .map_err(|_| DomainError::Authentication)?;

    if raw.len() < HEADER_LEN + NONCE_LEN + TAG_LEN || raw[0] != TOKEN_VERSION {
        return Err(DomainError::Authentication);
    }

    let (header, rest) = raw.split_at(HEADER_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad: header })
        .map_err(|_| DomainError::Authentication)?;

    String::from_utf8(plaintext).map_err(|_| DomainError::Authentication)
}

fn seal(
    plaintext: &str,
    key: &DataKey,
    issued_at: i64,
    nonce: &[u8; NONCE_LEN],
) -> Result<EncryptedField, DomainError> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key.key_bytes()?));

    let mut token = Vec::with_capacity(HEADER_LEN + NONCE_LEN + plaintext.len() + TAG_LEN);
    token.push(TOKEN_VERSION);
    token.extend_from_slice(&issued_at.to_be_bytes());

    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload { msg: plaintext.as_bytes(), aad: &token[..HEADER_LEN] },
        )
        .map_err(|_| DomainError::InvalidKey)?;

    token.extend_from_slice(nonce);
    token.extend_from_slice(&ciphertext);

    Ok(EncryptedField(URL_SAFE.encode(token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::keys::SALT_LEN;

    fn key(seed: u8) -> DataKey {
        DataKey::derive_with_salt("Passw0rd!", &[seed; SALT_LEN])
    }

    #[test]
    fn round_trip() {
        let k = key(1);
        for plaintext in ["Ada", "", "Zoë-Ñuñez", "a much longer surname than usual"] {
            let sealed = encrypt(plaintext, &k).unwrap();
            assert_eq!(decrypt(&sealed, &k).unwrap(), plaintext);
        }
    }

    #[test]
    fn encryption_is_not_deterministic() {
        let k = key(1);
        let a = encrypt("Grace", &k).unwrap();
        let b = encrypt("Grace", &k).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_is_rejected() {
        let sealed = encrypt("Grace", &key(1)).unwrap();
        assert_eq!(decrypt(&sealed, &key(2)), Err(DomainError::Authentication));
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let k = key(1);
        let sealed = encrypt("Grace", &k).unwrap();

        let mut raw = URL_SAFE.decode(sealed.as_str()).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = EncryptedField::from_stored(URL_SAFE.encode(&raw));

        assert_eq!(decrypt(&tampered, &k), Err(DomainError::Authentication));
    }

    #[test]
    fn tampered_timestamp_is_rejected() {
        let k = key(1);
        let sealed = seal("Grace", &k, 1_700_000_000, &[9u8; NONCE_LEN]).unwrap();

        let mut raw = URL_SAFE.decode(sealed.as_str()).unwrap();
        raw[8] ^= 0x01;
        let tampered = EncryptedField::from_stored(URL_SAFE.encode(&raw));

        assert_eq!(decrypt(&tampered, &k), Err(DomainError::Authentication));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let k = key(1);
        for token in ["", "%%%", "gAAAAA=="] {
            assert_eq!(
                decrypt(&EncryptedField::from_stored(token), &k),
                Err(DomainError::Authentication)
            );
        }
    }

    #[test]
    fn header_carries_version_and_timestamp() {
        let sealed = seal("Grace", &key(1), 1_700_000_000, &[0u8; NONCE_LEN]).unwrap();
        let raw = URL_SAFE.decode(sealed.as_str()).unwrap();
        assert_eq!(raw[0], TOKEN_VERSION);
        assert_eq!(i64::from_be_bytes(raw[1..9].try_into().unwrap()), 1_700_000_000);
        assert_eq!(raw.len(), HEADER_LEN + NONCE_LEN + "Grace".len() + TAG_LEN);
    }
}
