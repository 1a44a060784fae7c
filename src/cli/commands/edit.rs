//! `passvault edit` — change fields of an existing credential.
//!
//! Only the flags that are passed are changed.  Passing an empty string
//! for an optional field (username, email, notes) clears it.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{credential_password, ensure_master_matches, unlock_vault, Cli};
use crate::errors::{Result, VaultError};

/// Arguments for the `edit` command.
pub struct EditArgs<'a> {
    pub id: i64,
    pub website: Option<&'a str>,
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub password: Option<&'a str>,
    pub generate: bool,
    pub force: bool,
}

impl EditArgs<'_> {
    fn changes_anything(&self) -> bool {
        self.website.is_some()
            || self.username.is_some()
            || self.email.is_some()
            || self.notes.is_some()
            || self.password.is_some()
            || self.generate
    }
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, args: &EditArgs<'_>) -> Result<()> {
    if !args.changes_anything() {
        return Err(VaultError::CommandFailed(
            "nothing to change — pass at least one of --website, --username, --email, --notes, --password, --generate".into(),
        ));
    }

    let (settings, vault, session) = unlock_vault(cli)?;
    ensure_master_matches(&vault, &session, args.force)?;
    let decoded = vault.get(&session, args.id)?;
    let mut record = decoded.record;

    let replaces_password = args.password.is_some() || args.generate;
    if decoded.password_unreadable && !replaces_password {
        return Err(VaultError::CommandFailed(format!(
            "the stored password of #{} cannot be decrypted with this master password; \
             pass --password or --generate to replace it",
            args.id
        )));
    }
    if decoded.notes_unreadable && args.notes.is_none() {
        if !args.force {
            return Err(VaultError::CommandFailed(format!(
                "the stored notes of #{} cannot be decrypted with this master password; \
                 pass --notes to replace them, or --force to clear them",
                args.id
            )));
        }
        output::warning("Stored notes could not be decrypted and will be cleared.");
    }

    if let Some(website) = args.website {
        record.website = website.to_string();
    }
    if let Some(username) = args.username {
        record.username = username.to_string();
    }
    if let Some(email) = args.email {
        record.email = email.to_string();
    }
    if let Some(notes) = args.notes {
        record.notes = Zeroizing::new(notes.to_string());
    }
    if replaces_password {
        record.password =
            credential_password(args.password, args.generate, &settings, "New password")?;
    }

    vault.save(&session, &mut record)?;
    vault.lock(session);

    crate::audit::log_audit(cli, "edit", Some(record.id), Some(&record.website));
    output::success(&format!("Updated #{} ({})", record.id, record.website));

    Ok(())
}
