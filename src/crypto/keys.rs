//! Key material types.
//!
//! - [`DerivedKey`]: the 32-byte symmetric key produced by Argon2id.  Owned
//!   by a `VaultSession`, wiped from memory when dropped.
//! - [`VaultSalt`]: the random, non-secret per-vault salt.  Persisted in the
//!   vault metadata as base64 text.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Length of the vault salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// A 32-byte symmetric key that zeroes its memory when dropped.
///
/// Deliberately not `Clone` and not serializable: there is exactly one live
/// copy per unlocked session.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build the AES-256-GCM cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// The per-vault random salt.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct VaultSalt([u8; SALT_LEN]);

impl VaultSalt {
    /// Generate a fresh salt from the OS-seeded CSPRNG.
    pub fn generate() -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);
        Self(salt)
    }

    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }

    /// Encode as standard base64 for storage in the vault metadata.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Parse a salt previously written by [`VaultSalt::to_base64`].
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| VaultError::KeyDerivationFailed(format!("salt is not base64: {e}")))?;
        let bytes: [u8; SALT_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            VaultError::KeyDerivationFailed(format!(
                "salt must be {SALT_LEN} bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for VaultSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VaultSalt({})", self.to_base64())
    }
}
