//! `passvault init` — create a new vault with a fresh random salt.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli};
use crate::config::Settings;
use crate::crypto::KdfParams;
use crate::errors::{Result, VaultError};
use crate::storage::SqliteStore;
use crate::vault::Vault;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault_dir = cli.vault_dir();

    // 1. Create the vault directory if it doesn't exist.
    if !vault_dir.exists() {
        fs::create_dir_all(&vault_dir)?;
        output::info(&format!("Created vault directory: {}", vault_dir.display()));
    }

    // 2. Refuse to overwrite an existing vault.
    let settings = Settings::load(&vault_dir)?;
    let db_path = settings.database_path(&vault_dir);
    if db_path.exists() {
        output::tip("Use `passvault add` to store credentials in the existing vault.");
        return Err(VaultError::VaultAlreadyExists(db_path));
    }

    // 3. Check the configured KDF cost and choose the master password
    //    before touching disk.
    let kdf_params = settings.kdf_params();
    kdf_params.validate()?;
    let password = prompt_new_password(settings.min_password_len)?;

    // 4. Write the salt and KDF parameters, then derive once so a bad
    //    parameter set fails now. A failure leaves no database behind.
    if let Err(e) = create_vault(&db_path, &kdf_params, password.as_bytes()) {
        if let Err(rm) = fs::remove_file(&db_path) {
            debug!(error = %rm, "could not remove partial vault database");
        }
        return Err(e);
    }

    crate::audit::log_audit(cli, "init", None, Some("vault created"));

    output::success(&format!("Vault created at {}", db_path.display()));
    output::warning("The master password cannot be recovered. Losing it loses every credential.");
    output::tip("Run `passvault add <WEBSITE>` to store your first credential.");

    Ok(())
}

fn create_vault(db_path: &Path, kdf_params: &KdfParams, password: &[u8]) -> Result<()> {
    let vault = Vault::create(SqliteStore::open(db_path)?, kdf_params)?;
    let session = vault.unlock(password)?;
    vault.lock(session);
    Ok(())
}
