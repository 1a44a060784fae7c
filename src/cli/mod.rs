//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::audit::log_audit;
use crate::config::{default_vault_dir, Settings};
use crate::errors::{Result, VaultError};
use crate::generator::generate_password;
use crate::storage::SqliteStore;
use crate::vault::{Vault, VaultSession};

/// Environment variable checked before prompting for the master password.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: ~/.passvault)
    #[arg(long, env = "PASSVAULT_DIR", global = true)]
    pub vault_dir: Option<PathBuf>,
}

impl Cli {
    /// The vault directory from `--vault-dir` / `PASSVAULT_DIR`, or the default.
    pub fn vault_dir(&self) -> PathBuf {
        self.vault_dir.clone().unwrap_or_else(default_vault_dir)
    }
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault protected by a master password
    Init,

    /// Add a credential
    Add {
        /// Website or service name (e.g. github.com)
        website: String,
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Password value (omit for interactive prompt)
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,
        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,
        /// Write even if the master password opens no stored credential
        #[arg(short, long)]
        force: bool,
    },

    /// Change fields of an existing credential
    Edit {
        /// Credential id (see `passvault list`)
        id: i64,
        #[arg(short, long)]
        website: Option<String>,
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// New password value
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,
        /// Replace the password with a generated one
        #[arg(short, long)]
        generate: bool,
        /// Write even if the master password cannot read this credential
        #[arg(short, long)]
        force: bool,
    },

    /// List credentials (passwords masked)
    List {
        /// Only show entries whose website, username or email contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one field of a credential
    Show {
        /// Credential id
        id: i64,
        /// Field to show
        #[arg(short, long, value_enum, default_value_t = Field::Password)]
        field: Field,
        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// Delete a credential
    Delete {
        /// Credential id
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password (does not open the vault)
    Generate {
        /// Number of characters (default from config, 16)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },
}

/// Credential fields `show` can print or copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Field {
    Password,
    Username,
    Email,
    Notes,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (scripting)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `PASSVAULT_PASSWORD`.  Enforces a minimum length.
pub fn prompt_new_password(min_len: usize) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            if pw.chars().count() < min_len {
                return Err(VaultError::CommandFailed(format!(
                    "master password must be at least {min_len} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < min_len {
            output::warning(&format!(
                "Master password must be at least {min_len} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Resolve the password for a credential from an inline value, the
/// generator, or an interactive prompt (in that order).
pub fn credential_password(
    inline: Option<&str>,
    generate: bool,
    settings: &Settings,
    prompt: &str,
) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        output::warning("Password provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }
    if generate {
        return generate_password(settings.generated_password_len);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Refuse to write when the session key opens none of the stored
/// credentials, unless `force` is set.
pub fn ensure_master_matches(
    vault: &Vault<SqliteStore>,
    session: &VaultSession,
    force: bool,
) -> Result<()> {
    if vault.key_matches(session)? != Some(false) {
        return Ok(());
    }
    if force {
        output::warning("No stored credential opens with this master password; writing anyway (--force).");
        return Ok(());
    }
    Err(VaultError::CommandFailed(
        "no stored credential can be decrypted with this master password; \
         nothing was written (check the password, or pass --force)"
            .into(),
    ))
}

/// Load settings and open the vault database without unlocking it.
pub fn open_vault(cli: &Cli) -> Result<(Settings, Vault<SqliteStore>)> {
    let vault_dir = cli.vault_dir();
    let settings = Settings::load(&vault_dir)?;
    let db_path = settings.database_path(&vault_dir);

    if !db_path.exists() {
        return Err(VaultError::VaultNotInitialized(db_path));
    }

    let store = SqliteStore::open(&db_path)?;
    let vault = Vault::open(store)?;
    Ok((settings, vault))
}

/// Open the vault and unlock a session with the master password.
pub fn unlock_vault(cli: &Cli) -> Result<(Settings, Vault<SqliteStore>, VaultSession)> {
    let (settings, vault) = open_vault(cli)?;
    let password = prompt_password()?;
    let session = vault.unlock(password.as_bytes())?;
    log_audit(cli, "unlock", None, None);
    Ok((settings, vault, session))
}
