//! Configuration loaded from `passvault.toml`.

pub mod settings;

pub use settings::{default_vault_dir, Settings};
