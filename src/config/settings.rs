use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Vault-level configuration, loaded from `<vault_dir>/passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Database file name inside the vault directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Minimum master password length accepted by `init`.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Length of passwords produced by `generate` and `--generate`.
    #[serde(default = "default_generated_password_len")]
    pub generated_password_len: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_database_file() -> String {
    "passwords.db".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_min_password_len() -> usize {
    8
}

fn default_generated_password_len() -> usize {
    crate::generator::DEFAULT_LENGTH
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            min_password_len: default_min_password_len(),
            generated_password_len: default_generated_password_len(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the vault directory.
    const FILE_NAME: &'static str = "passvault.toml";

    /// Load settings from `<vault_dir>/passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(vault_dir: &Path) -> Result<Self> {
        let config_path = vault_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to the credential database.
    ///
    /// Example: `~/.passvault/passwords.db`
    pub fn database_path(&self, vault_dir: &Path) -> PathBuf {
        vault_dir.join(&self.database_file)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn kdf_params(&self) -> crate::crypto::KdfParams {
        crate::crypto::KdfParams {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

/// Default vault directory: `~/.passvault`, or `./.passvault` when no home
/// directory can be determined.
pub fn default_vault_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".passvault")
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.database_file, "passwords.db");
        assert_eq!(s.argon2_memory_kib, 65_536);
        assert_eq!(s.argon2_iterations, 3);
        assert_eq!(s.argon2_parallelism, 4);
        assert_eq!(s.min_password_len, 8);
        assert_eq!(s.generated_password_len, 16);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.database_file, "passwords.db");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
database_file = "work.db"
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
min_password_len = 12
generated_password_len = 24
"#;
        fs::write(tmp.path().join("passvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.database_file, "work.db");
        assert_eq!(settings.argon2_memory_kib, 131_072);
        assert_eq!(settings.argon2_iterations, 5);
        assert_eq!(settings.argon2_parallelism, 8);
        assert_eq!(settings.min_password_len, 12);
        assert_eq!(settings.generated_password_len, 24);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("passvault.toml"), "argon2_iterations = 4\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.argon2_iterations, 4);
        assert_eq!(settings.database_file, "passwords.db");
        assert_eq!(settings.min_password_len, 8);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("passvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(VaultError::ConfigError(_))));
    }

    #[test]
    fn database_path_respects_custom_file() {
        let s = Settings {
            database_file: "other.db".to_string(),
            ..Settings::default()
        };
        let path = s.database_path(Path::new("/home/user/.passvault"));
        assert_eq!(path, PathBuf::from("/home/user/.passvault/other.db"));
    }

    #[test]
    fn kdf_params_mirror_settings() {
        let s = Settings {
            argon2_memory_kib: 9_000,
            argon2_iterations: 2,
            argon2_parallelism: 1,
            ..Settings::default()
        };
        let p = s.kdf_params();
        assert_eq!((p.memory_kib, p.iterations, p.parallelism), (9_000, 2, 1));
    }
}
