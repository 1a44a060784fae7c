//! Conversion between `CredentialRecord` and `PersistableRecord`.
//!
//! Password and notes go through the cipher; website, username and email
//! stay in plaintext so storage can sort and search on them.
//!
//! Decoding never fails.  A field that cannot be opened (wrong key,
//! tampering, legacy format) decodes to an empty string and is flagged on
//! the returned `DecodedRecord`, so one bad row cannot abort a list load.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

use super::record::{CredentialRecord, PersistableRecord};
use crate::crypto::{self, DerivedKey, EncryptedField};
use crate::errors::Result;

/// Naive timestamp layouts accepted for rows written before RFC 3339 was used.
const LEGACY_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Result of decoding one stored row.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    pub record: CredentialRecord,
    /// The password field could not be decrypted and was replaced by "".
    pub password_unreadable: bool,
    /// The notes field could not be decrypted and was replaced by "".
    pub notes_unreadable: bool,
}

impl DecodedRecord {
    /// `true` when every sealed field decrypted cleanly.
    pub fn is_intact(&self) -> bool {
        !self.password_unreadable && !self.notes_unreadable
    }
}

/// Validate and seal a record for storage.
pub fn encode(key: &DerivedKey, record: &CredentialRecord) -> Result<PersistableRecord> {
    let mut record = record.clone();
    record.validate()?;

    let password_field = crypto::seal(key, record.password.as_bytes())?;
    let notes_field = crypto::seal(key, record.notes.as_bytes())?;

    Ok(PersistableRecord {
        id: record.id,
        website: record.website.clone(),
        username: record.username.clone(),
        email: record.email.clone(),
        password_field,
        notes_field,
        created_at: Some(record.created_at.to_rfc3339()),
        modified_at: Some(record.modified_at.to_rfc3339()),
    })
}

/// Open a stored row, absorbing per-field decryption failures.
pub fn decode(key: &DerivedKey, row: &PersistableRecord) -> DecodedRecord {
    let (password, password_unreadable) = open_text(key, &row.password_field, row.id, "password");
    let (notes, notes_unreadable) = open_text(key, &row.notes_field, row.id, "notes");

    let record = CredentialRecord {
        id: row.id,
        website: row.website.clone(),
        username: row.username.clone(),
        email: row.email.clone(),
        password,
        notes,
        created_at: parse_timestamp(row.created_at.as_deref()),
        modified_at: parse_timestamp(row.modified_at.as_deref()),
    };

    DecodedRecord {
        record,
        password_unreadable,
        notes_unreadable,
    }
}

fn open_text(
    key: &DerivedKey,
    field: &EncryptedField,
    id: i64,
    field_name: &str,
) -> (Zeroizing<String>, bool) {
    let bytes = match crypto::open(key, field) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(record_id = id, field = field_name, error = %e, "field could not be decrypted");
            return (Zeroizing::new(String::new()), true);
        }
    };

    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => (Zeroizing::new(text), false),
        Err(e) => {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            warn!(record_id = id, field = field_name, "decrypted field is not valid UTF-8");
            (Zeroizing::new(String::new()), true)
        }
    }
}

/// Parse a stored timestamp, falling back to now when missing or unreadable.
pub fn parse_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Utc::now();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }

    LEGACY_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map_or_else(Utc::now, |naive| naive.and_utc())
}
