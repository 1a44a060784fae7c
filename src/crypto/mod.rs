//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - Argon2id password-based key derivation (`kdf`)
//! - Key material types that wipe themselves on drop (`keys`)
//! - AES-256-GCM sealing of single field values (`cipher`)

pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_key, ...};
pub use cipher::{open, seal, EncryptedField};
pub use kdf::{derive_key, derive_with_iterations, KdfParams};
pub use keys::{DerivedKey, VaultSalt};
