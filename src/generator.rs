//! Random password generation for new credentials.

use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// Characters drawn from: ASCII letters, digits and a few symbols that are
/// accepted by most sites.
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Default generated length.
pub const DEFAULT_LENGTH: usize = 16;

const MAX_LENGTH: usize = 256;

/// Generate a random password of `length` characters using the thread CSPRNG.
pub fn generate_password(length: usize) -> Result<Zeroizing<String>> {
    if length == 0 || length > MAX_LENGTH {
        return Err(VaultError::CommandFailed(format!(
            "password length must be between 1 and {MAX_LENGTH} (got {length})"
        )));
    }

    let mut rng = rand::rng();
    let password: String = (0..length)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect();

    Ok(Zeroizing::new(password))
}
