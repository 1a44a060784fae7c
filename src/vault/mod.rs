//! Vault module — credential records and the sealed-storage pipeline.
//!
//! This module provides:
//! - `CredentialRecord` and `PersistableRecord` types (`record`)
//! - Record sealing/opening with per-field failure absorption (`codec`)
//! - The locked/unlocked session state machine (`session`)
//! - High-level `Vault` handle driving storage with a session (`store`)

pub mod codec;
pub mod record;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use codec::DecodedRecord;
pub use record::{CredentialRecord, PersistableRecord};
pub use session::{SessionStatus, VaultSession};
pub use store::{search, Vault};
