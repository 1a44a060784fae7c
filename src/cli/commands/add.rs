//! `passvault add` — store a new credential.

use crate::cli::output;
use crate::cli::{credential_password, ensure_master_matches, unlock_vault, Cli};
use crate::errors::Result;
use crate::vault::CredentialRecord;

/// Arguments for the `add` command.
pub struct AddArgs<'a> {
    pub website: &'a str,
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub password: Option<&'a str>,
    pub generate: bool,
    pub force: bool,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: &AddArgs<'_>) -> Result<()> {
    let (settings, vault, session) = unlock_vault(cli)?;
    ensure_master_matches(&vault, &session, args.force)?;

    let password = credential_password(
        args.password,
        args.generate,
        &settings,
        &format!("Password for {}", args.website),
    )?;

    let mut record = CredentialRecord::new(args.website, password.as_str())
        .with_username(args.username.unwrap_or_default())
        .with_email(args.email.unwrap_or_default())
        .with_notes(args.notes.unwrap_or_default());

    let id = vault.save(&session, &mut record)?;
    vault.lock(session);

    crate::audit::log_audit(cli, "add", Some(id), Some(&record.website));
    output::success(&format!("Saved '{}' as #{id}", record.website));
    if args.generate {
        output::tip(&format!("Copy it with: passvault show {id} --copy"));
    }

    Ok(())
}
