//! Storage collaborator — where sealed records and vault metadata live.
//!
//! The vault core only needs the operations in [`CredentialStore`]; the
//! SQLite implementation in `sqlite` is the one the CLI uses.

pub mod sqlite;

use chrono::{DateTime, Utc};

use crate::crypto::{KdfParams, VaultSalt};
use crate::errors::Result;
use crate::vault::PersistableRecord;

pub use sqlite::SqliteStore;

/// Non-secret per-vault metadata, written once at vault creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultMeta {
    pub salt: VaultSalt,
    pub kdf_params: KdfParams,
    pub created_at: DateTime<Utc>,
}

/// Persistence operations the vault core relies on.
pub trait CredentialStore {
    /// Human-readable location, used in error messages.
    fn location(&self) -> std::path::PathBuf;

    /// Read the vault metadata, or `None` if the vault was never initialized.
    fn load_meta(&self) -> Result<Option<VaultMeta>>;

    /// Write the vault metadata.  Fails if metadata already exists.
    fn init_meta(&self, meta: &VaultMeta) -> Result<()>;

    /// Insert a new row (its `id` is ignored) and return the assigned id.
    fn insert(&self, row: &PersistableRecord) -> Result<i64>;

    /// Overwrite the row with `row.id`.  Fails with `RecordNotFound` if absent.
    fn update(&self, row: &PersistableRecord) -> Result<()>;

    /// Remove the row with `id`.  Fails with `RecordNotFound` if absent.
    fn delete(&self, id: i64) -> Result<()>;

    /// All rows, ordered by website.
    fn select_all(&self) -> Result<Vec<PersistableRecord>>;

    /// One row by id.
    fn select(&self, id: i64) -> Result<Option<PersistableRecord>>;
}
