//! `passvault delete` — remove a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: i64, force: bool) -> Result<()> {
    let (_settings, vault, session) = unlock_vault(cli)?;

    // Look the record up first so the prompt can name it.
    let website = vault.get(&session, id)?.record.website;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete #{id} ({website})?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            vault.lock(session);
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.delete(&session, id)?;
    vault.lock(session);

    crate::audit::log_audit(cli, "delete", Some(id), Some(&website));
    output::success(&format!("Deleted #{id} ({website})"));

    Ok(())
}
