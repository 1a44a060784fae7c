//! `passvault list` — display credentials in a table.

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::Result;
use crate::vault::search;

/// Execute the `list` command.
pub fn execute(cli: &Cli, query: Option<&str>) -> Result<()> {
    let (_settings, vault, session) = unlock_vault(cli)?;
    let records = vault.load_all_checked(&session)?;
    vault.lock(session);

    let shown = search(&records, query.unwrap_or_default());

    output::info(&format!("{} of {} credential(s)", shown.len(), records.len()));
    output::print_records_table(&shown);

    let unreadable = records.iter().filter(|r| !r.is_intact()).count();
    if unreadable > 0 {
        output::warning(&format!(
            "{unreadable} credential(s) could not be decrypted — wrong master password or corrupted data."
        ));
    }

    Ok(())
}
