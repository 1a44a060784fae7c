//! Credential record types.
//!
//! `CredentialRecord` is the plaintext, in-memory shape the UI works with.
//! `PersistableRecord` is what crosses into storage: identifying metadata in
//! plaintext, password and notes as sealed `EncryptedField`s, timestamps as
//! the text the storage layer holds.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::crypto::EncryptedField;
use crate::errors::{Result, VaultError};

/// A single website/service credential, decrypted.
#[derive(Clone)]
pub struct CredentialRecord {
    /// Storage id; `0` means "not yet persisted".
    pub id: i64,
    pub website: String,
    pub username: String,
    pub email: String,
    /// Plaintext password, wiped on drop.
    pub password: Zeroizing<String>,
    /// Free-form notes, wiped on drop.
    pub notes: Zeroizing<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Start a new, unsaved record with both timestamps set to now.
    pub fn new(website: impl Into<String>, password: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            website: website.into(),
            username: String::new(),
            email: String::new(),
            password: Zeroizing::new(password.into()),
            notes: Zeroizing::new(String::new()),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Zeroizing::new(notes.into());
        self
    }

    /// `true` once the storage layer has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// One `*` per password character, for list views.
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    /// Trim the text fields and enforce that website and password are set.
    pub fn validate(&mut self) -> Result<()> {
        trim_in_place(&mut self.website);
        trim_in_place(&mut self.username);
        trim_in_place(&mut self.email);

        if self.website.is_empty() {
            return Err(VaultError::InvalidRecord(
                "website/service is required".into(),
            ));
        }

        let trimmed = self.password.trim();
        if trimmed.is_empty() {
            return Err(VaultError::InvalidRecord("password is required".into()));
        }
        if trimmed.len() != self.password.len() {
            self.password = Zeroizing::new(trimmed.to_string());
        }

        let trimmed = self.notes.trim();
        if trimmed.len() != self.notes.len() {
            self.notes = Zeroizing::new(trimmed.to_string());
        }

        Ok(())
    }

    /// Case-insensitive substring match over website, username and email.
    ///
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.website.to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("website", &self.website)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("notes", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("modified_at", &self.modified_at)
            .finish()
    }
}

/// A record in storage-ready form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistableRecord {
    pub id: i64,
    pub website: String,
    pub username: String,
    pub email: String,
    pub password_field: EncryptedField,
    pub notes_field: EncryptedField,
    /// RFC 3339 text; `None` when the column is NULL.
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
}
