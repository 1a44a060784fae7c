//! `passvault show` — print or copy one field of a credential.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{unlock_vault, Cli, Field};
use crate::errors::{Result, VaultError};
use crate::vault::DecodedRecord;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: i64, field: Field, copy: bool) -> Result<()> {
    let (_settings, vault, session) = unlock_vault(cli)?;
    let decoded = vault.get(&session, id)?;
    vault.lock(session);

    let value = field_value(&decoded, field)?;

    if copy {
        copy_to_clipboard(&value)?;
        crate::audit::log_audit(cli, "copy", Some(id), Some(field_name(field)));
        output::success(&format!(
            "{} for '{}' copied to clipboard",
            field_name(field),
            decoded.record.website
        ));
    } else {
        println!("{}", value.as_str());
    }

    Ok(())
}

fn field_value(decoded: &DecodedRecord, field: Field) -> Result<Zeroizing<String>> {
    let r = &decoded.record;
    match field {
        Field::Password if decoded.password_unreadable => Err(VaultError::DecryptionFailed),
        Field::Notes if decoded.notes_unreadable => Err(VaultError::DecryptionFailed),
        Field::Password => Ok(r.password.clone()),
        Field::Notes => Ok(r.notes.clone()),
        Field::Username => Ok(Zeroizing::new(r.username.clone())),
        Field::Email => Ok(Zeroizing::new(r.email.clone())),
    }
}

fn field_name(field: Field) -> &'static str {
    match field {
        Field::Password => "password",
        Field::Username => "username",
        Field::Email => "email",
        Field::Notes => "notes",
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| VaultError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| VaultError::ClipboardError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::CredentialRecord;

    fn decoded(password_unreadable: bool) -> DecodedRecord {
        DecodedRecord {
            record: CredentialRecord::new("site", if password_unreadable { "" } else { "pw" })
                .with_username("me"),
            password_unreadable,
            notes_unreadable: false,
        }
    }

    #[test]
    fn picks_requested_field() {
        let d = decoded(false);
        assert_eq!(field_value(&d, Field::Password).unwrap().as_str(), "pw");
        assert_eq!(field_value(&d, Field::Username).unwrap().as_str(), "me");
        assert_eq!(field_value(&d, Field::Notes).unwrap().as_str(), "");
    }

    #[test]
    fn unreadable_password_is_an_error_not_blank() {
        let d = decoded(true);
        assert!(matches!(
            field_value(&d, Field::Password),
            Err(VaultError::DecryptionFailed)
        ));
        assert!(field_value(&d, Field::Username).is_ok());
    }
}
