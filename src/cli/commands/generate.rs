//! `passvault generate` — print a random password.

use crate::cli::Cli;
use crate::config::Settings;
use crate::errors::Result;
use crate::generator::generate_password;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, length: Option<usize>) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => Settings::load(&cli.vault_dir())?.generated_password_len,
    };

    let password = generate_password(length)?;
    println!("{}", password.as_str());

    Ok(())
}
