//! High-level vault operations used by CLI commands.
//!
//! `Vault` ties a storage backend to the per-vault metadata and hands out
//! `VaultSession`s.  Every call that touches sealed data takes the session
//! explicitly; there is no ambient "current key".

use chrono::Utc;
use tracing::{debug, info};

use super::codec::DecodedRecord;
use super::record::CredentialRecord;
use super::session::VaultSession;
use crate::crypto::{KdfParams, VaultSalt};
use crate::errors::{Result, VaultError};
use crate::storage::{CredentialStore, VaultMeta};

/// The main vault handle.  Create one with `Vault::create` or
/// `Vault::open`, then `unlock` it to get a session.
pub struct Vault<S: CredentialStore> {
    store: S,
    meta: VaultMeta,
}

impl<S: CredentialStore> Vault<S> {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Initialize a brand-new vault in `store`.
    ///
    /// Generates the random per-vault salt and records it, together with
    /// the Argon2 parameters, as vault metadata.  No password is needed:
    /// nothing is encrypted until the first record is saved.
    pub fn create(store: S, kdf_params: &KdfParams) -> Result<Self> {
        kdf_params.validate()?;

        if store.load_meta()?.is_some() {
            return Err(VaultError::VaultAlreadyExists(store.location()));
        }

        let meta = VaultMeta {
            salt: VaultSalt::generate(),
            kdf_params: *kdf_params,
            created_at: Utc::now(),
        };
        store.init_meta(&meta)?;
        info!(location = %store.location().display(), "vault created");

        Ok(Self { store, meta })
    }

    /// Open an existing vault.  Reads only non-secret metadata.
    pub fn open(store: S) -> Result<Self> {
        let meta = store
            .load_meta()?
            .ok_or_else(|| VaultError::VaultNotInitialized(store.location()))?;
        Ok(Self { store, meta })
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Derive the session key from `password` with the vault's salt.
    ///
    /// Succeeds for any password; a wrong one only surfaces as records
    /// whose sealed fields cannot be read.
    pub fn unlock(&self, password: &[u8]) -> Result<VaultSession> {
        let session = VaultSession::new();
        session.unlock(password, &self.meta.salt, &self.meta.kdf_params)?;
        Ok(session)
    }

    /// End a session, wiping its key.
    pub fn lock(&self, session: VaultSession) {
        session.lock();
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Insert (`id == 0`) or update a record and return its id.
    ///
    /// On insert the assigned id is written back into `record`; on update
    /// `modified_at` is bumped to now.  `record` is only changed once the
    /// store has accepted the row.
    pub fn save(&self, session: &VaultSession, record: &mut CredentialRecord) -> Result<i64> {
        let mut staged = record.clone();
        staged.validate()?;

        if staged.is_persisted() {
            staged.modified_at = Utc::now();
            let row = session.encrypt_for_save(&staged)?;
            self.store.update(&row)?;
            debug!(record_id = staged.id, "record updated");
        } else {
            let row = session.encrypt_for_save(&staged)?;
            staged.id = self.store.insert(&row)?;
            debug!(record_id = staged.id, "record inserted");
        }

        *record = staged;
        Ok(record.id)
    }

    /// Load every record, ordered by website.
    ///
    /// Fields that fail to decrypt come back as empty strings.
    pub fn load_all(&self, session: &VaultSession) -> Result<Vec<CredentialRecord>> {
        Ok(self
            .load_all_checked(session)?
            .into_iter()
            .map(|decoded| decoded.record)
            .collect())
    }

    /// Like `load_all`, but keeps the per-record "could not decrypt" flags.
    pub fn load_all_checked(&self, session: &VaultSession) -> Result<Vec<DecodedRecord>> {
        session.ensure_unlocked()?;
        let rows = self.store.select_all()?;
        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(session.decrypt_for_load(row)?);
        }

        let unreadable = records.iter().filter(|r| !r.is_intact()).count();
        debug!(total = records.len(), unreadable, "records loaded");
        Ok(records)
    }

    /// Load a single record.  Requires an unlocked session.
    pub fn get(&self, session: &VaultSession, id: i64) -> Result<DecodedRecord> {
        session.ensure_unlocked()?;
        let row = self
            .store
            .select(id)?
            .ok_or(VaultError::RecordNotFound(id))?;
        session.decrypt_for_load(&row)
    }

    /// Remove a record.  Requires an unlocked session.
    pub fn delete(&self, session: &VaultSession, id: i64) -> Result<()> {
        session.ensure_unlocked()?;
        self.store.delete(id)?;
        debug!(record_id = id, "record deleted");
        Ok(())
    }

    /// Whether the session key opens this vault's stored passwords.
    ///
    /// `None` when the vault holds no records yet.  Every saved record has a
    /// sealed password, so a key that opens none of them is almost certainly
    /// from a mistyped master password.
    pub fn key_matches(&self, session: &VaultSession) -> Result<Option<bool>> {
        let records = self.load_all_checked(session)?;
        if records.is_empty() {
            return Ok(None);
        }
        Ok(Some(records.iter().any(|r| !r.password_unreadable)))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the vault metadata (salt, KDF parameters, creation time).
    pub fn meta(&self) -> &VaultMeta {
        &self.meta
    }

    /// Returns the underlying storage backend.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Filter decoded records with a case-insensitive search over website,
/// username and email.
pub fn search<'a>(records: &'a [DecodedRecord], query: &str) -> Vec<&'a DecodedRecord> {
    records.iter().filter(|r| r.record.matches(query)).collect()
}
