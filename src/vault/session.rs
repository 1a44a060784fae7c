//! Unlocked-session state machine.
//!
//! ```text
//! Locked ──unlock──▶ Unlocking ──ok──▶ Unlocked ──lock──▶ Locked
//!                        └──derivation error──▶ Locked
//! ```
//!
//! The state and the key live behind one mutex, so encrypt/decrypt calls
//! and `lock` serialize against each other.  The mutex is released while
//! Argon2id runs; a `lock` that lands during that window wins and the
//! freshly derived key is discarded.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::codec::{self, DecodedRecord};
use super::record::{CredentialRecord, PersistableRecord};
use crate::crypto::{kdf, DerivedKey, KdfParams, VaultSalt};
use crate::errors::{Result, VaultError};

/// Observable session state, without the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Locked,
    Unlocking,
    Unlocked,
}

enum SessionState {
    Locked,
    Unlocking,
    Unlocked(DerivedKey),
}

/// Holds the derived key for the lifetime of one unlocked session.
pub struct VaultSession {
    state: Mutex<SessionState>,
}

impl Default for VaultSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSession")
            .field("status", &self.status())
            .finish()
    }
}

impl VaultSession {
    /// A new session starts locked.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::Locked),
        }
    }

    /// Derive the key from `password` and move to `Unlocked`.
    ///
    /// A wrong password still succeeds here; it only shows up later as
    /// fields that fail to decrypt.
    pub fn unlock(&self, password: &[u8], salt: &VaultSalt, params: &KdfParams) -> Result<()> {
        {
            let mut state = self.guard()?;
            match *state {
                SessionState::Locked => *state = SessionState::Unlocking,
                SessionState::Unlocking => {
                    return Err(VaultError::Session("unlock already in progress".into()))
                }
                SessionState::Unlocked(_) => {
                    return Err(VaultError::Session("session is already unlocked".into()))
                }
            }
        }

        debug!("deriving session key");
        let derived = kdf::derive_key(password, salt.as_bytes(), params);

        let mut state = self.guard()?;
        match derived {
            Ok(key) => {
                if matches!(*state, SessionState::Unlocking) {
                    *state = SessionState::Unlocked(key);
                    debug!("session unlocked");
                    Ok(())
                } else {
                    // lock() ran while we were deriving; `key` is dropped (and wiped) here.
                    Err(VaultError::Session("session was locked during unlock".into()))
                }
            }
            Err(e) => {
                *state = SessionState::Locked;
                Err(VaultError::Session(format!("unlock failed: {e}")))
            }
        }
    }

    /// Discard the key and return to `Locked`.  Idempotent.
    pub fn lock(&self) {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *state = SessionState::Locked;
        debug!("session locked");
    }

    pub fn status(&self) -> SessionStatus {
        match self.state.lock() {
            Ok(state) => match *state {
                SessionState::Locked => SessionStatus::Locked,
                SessionState::Unlocking => SessionStatus::Unlocking,
                SessionState::Unlocked(_) => SessionStatus::Unlocked,
            },
            Err(_) => SessionStatus::Locked,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.status() == SessionStatus::Unlocked
    }

    /// Seal a record for storage with the session key.
    pub fn encrypt_for_save(&self, record: &CredentialRecord) -> Result<PersistableRecord> {
        self.with_key(|key| codec::encode(key, record))
    }

    /// Open a stored row with the session key.
    pub fn decrypt_for_load(&self, row: &PersistableRecord) -> Result<DecodedRecord> {
        self.with_key(|key| Ok(codec::decode(key, row)))
    }

    /// Fail with `Session("not unlocked")` unless a key is held.
    pub fn ensure_unlocked(&self) -> Result<()> {
        self.with_key(|_| Ok(()))
    }

    fn with_key<T>(&self, f: impl FnOnce(&DerivedKey) -> Result<T>) -> Result<T> {
        let state = self.guard()?;
        match &*state {
            SessionState::Unlocked(key) => f(key),
            _ => Err(VaultError::Session("not unlocked".into())),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, SessionState>> {
        self.state
            .lock()
            .map_err(|_| VaultError::Session("session state poisoned".into()))
    }
}
