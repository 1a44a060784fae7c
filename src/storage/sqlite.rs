//! SQLite-backed credential storage.
//!
//! Two tables:
//! - `password_entries`: one row per credential; `password` and `notes`
//!   hold sealed fields, everything else is plaintext.
//! - `vault_meta`: key/value pairs for the salt, the Argon2 parameters
//!   (JSON) and the creation time.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{CredentialStore, VaultMeta};
use crate::crypto::{EncryptedField, KdfParams, VaultSalt};
use crate::errors::{Result, VaultError};
use crate::vault::PersistableRecord;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS password_entries (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    website       TEXT NOT NULL,
    username      TEXT,
    email         TEXT,
    password      TEXT NOT NULL,
    notes         TEXT,
    date_created  TEXT DEFAULT CURRENT_TIMESTAMP,
    date_modified TEXT DEFAULT CURRENT_TIMESTAMP
);
CREATE TABLE IF NOT EXISTS vault_meta (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);";

const SELECT_COLUMNS: &str =
    "SELECT id, website, username, email, password, notes, date_created, date_modified
     FROM password_entries";

/// Credential store in a single SQLite database file.
pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;

        // Owner-only access; the file holds ciphertext and plaintext metadata.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// A throwaway database, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    fn meta_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM vault_meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<PersistableRecord> {
    Ok(PersistableRecord {
        id: row.get(0)?,
        website: row.get(1)?,
        username: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        email: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        password_field: EncryptedField::from_stored(row.get::<_, String>(4)?),
        notes_field: EncryptedField::from_stored(
            row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        ),
        created_at: row.get(6)?,
        modified_at: row.get(7)?,
    })
}

impl CredentialStore for SqliteStore {
    fn location(&self) -> PathBuf {
        self.path.clone()
    }

    fn load_meta(&self) -> Result<Option<VaultMeta>> {
        let Some(salt) = self.meta_value("salt")? else {
            return Ok(None);
        };
        let salt = VaultSalt::from_base64(&salt)
            .map_err(|e| VaultError::InvalidVaultMeta(format!("salt: {e}")))?;

        let kdf_params = match self.meta_value("kdf_params")? {
            Some(json) => serde_json::from_str::<KdfParams>(&json)
                .map_err(|e| VaultError::InvalidVaultMeta(format!("kdf_params: {e}")))?,
            None => {
                return Err(VaultError::InvalidVaultMeta(
                    "kdf_params missing".into(),
                ))
            }
        };

        let created_at = self
            .meta_value("created_at")?
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map_or_else(Utc::now, |dt| dt.with_timezone(&Utc));

        Ok(Some(VaultMeta {
            salt,
            kdf_params,
            created_at,
        }))
    }

    fn init_meta(&self, meta: &VaultMeta) -> Result<()> {
        if self.meta_value("salt")?.is_some() {
            return Err(VaultError::VaultAlreadyExists(self.location()));
        }

        let kdf_json = serde_json::to_string(&meta.kdf_params)
            .map_err(|e| VaultError::SerializationError(format!("kdf_params: {e}")))?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO vault_meta (key, value) VALUES ('salt', ?1)",
            params![meta.salt.to_base64()],
        )?;
        tx.execute(
            "INSERT INTO vault_meta (key, value) VALUES ('kdf_params', ?1)",
            params![kdf_json],
        )?;
        tx.execute(
            "INSERT INTO vault_meta (key, value) VALUES ('created_at', ?1)",
            params![meta.created_at.to_rfc3339()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn insert(&self, row: &PersistableRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO password_entries
                (website, username, email, password, notes, date_created, date_modified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                row.website,
                row.username,
                row.email,
                row.password_field.as_str(),
                row.notes_field.as_str(),
                row.created_at,
                row.modified_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, row: &PersistableRecord) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE password_entries
             SET website = ?1, username = ?2, email = ?3, password = ?4, notes = ?5,
                 date_modified = ?6
             WHERE id = ?7",
            params![
                row.website,
                row.username,
                row.email,
                row.password_field.as_str(),
                row.notes_field.as_str(),
                row.modified_at,
                row.id,
            ],
        )?;
        if changed == 0 {
            return Err(VaultError::RecordNotFound(row.id));
        }
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM password_entries WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(VaultError::RecordNotFound(id));
        }
        Ok(())
    }

    fn select_all(&self) -> Result<Vec<PersistableRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY website COLLATE NOCASE, id"))?;
        let rows = stmt.query_map([], row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn select(&self, id: i64) -> Result<Option<PersistableRecord>> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                row_to_record,
            )
            .optional()?)
    }
}
