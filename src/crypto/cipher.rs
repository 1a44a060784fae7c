//! AES-256-GCM authenticated encryption of single field values.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  The whole blob is base64-encoded so it
//! fits in one text column:
//!
//! ```text
//! base64( [ 12-byte nonce | ciphertext | 16-byte auth tag ] )
//! ```
//!
//! The empty string is reserved as the "no value" sentinel and never
//! passes through the cipher.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroizing;

use super::keys::DerivedKey;
use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// A sealed field value as it is stored: base64 text, or empty for "no value".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EncryptedField(String);

impl EncryptedField {
    /// The "no value" sentinel.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Wrap text read back from storage.  Not validated until `open`.
    pub fn from_stored(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for EncryptedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("EncryptedField(<empty>)")
        } else {
            write!(f, "EncryptedField({} chars)", self.0.len())
        }
    }
}

/// Encrypt `plaintext` under `key`.
///
/// Empty input yields the sentinel without invoking the cipher.
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> Result<EncryptedField> {
    if plaintext.is_empty() {
        return Ok(EncryptedField::empty());
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);

    Ok(EncryptedField(BASE64.encode(blob)))
}

/// Decrypt a field produced by `seal`.
///
/// Fails with `DecryptionFailed` on malformed base64, truncated data, a
/// wrong key, or any tampering.  The sentinel opens to an empty buffer.
pub fn open(key: &DerivedKey, field: &EncryptedField) -> Result<Zeroizing<Vec<u8>>> {
    if field.is_empty() {
        return Ok(Zeroizing::new(Vec::new()));
    }

    let blob = BASE64
        .decode(field.as_str())
        .map_err(|_| VaultError::DecryptionFailed)?;

    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(VaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| VaultError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::DecryptionFailed)?;

    Ok(Zeroizing::new(plaintext))
}
