//! Integration tests for the PassVault crypto module.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use passvault::crypto::kdf::MIN_MEMORY_KIB;
use passvault::crypto::{derive_key, open, seal, DerivedKey, EncryptedField, KdfParams, VaultSalt};
use passvault::errors::VaultError;

/// Cheap Argon2 parameters so the tests stay fast.
fn fast() -> KdfParams {
    KdfParams {
        memory_kib: MIN_MEMORY_KIB,
        iterations: 1,
        parallelism: 1,
    }
}

fn key(byte: u8) -> DerivedKey {
    DerivedKey::new([byte; 32])
}

// ---------------------------------------------------------------------------
// Seal / open
// ---------------------------------------------------------------------------

#[test]
fn seal_open_roundtrip() {
    for plaintext in ["p@ss", "correct horse battery staple", "ünïcødé 🔑", "x"] {
        let field = seal(&key(0xAB), plaintext.as_bytes()).expect("seal");
        let recovered = open(&key(0xAB), &field).expect("open");
        assert_eq!(recovered.as_slice(), plaintext.as_bytes());
    }
}

#[test]
fn empty_plaintext_is_sentinel() {
    let field = seal(&key(1), b"").unwrap();
    assert_eq!(field.as_str(), "");
    assert!(open(&key(1), &field).unwrap().is_empty());
}

#[test]
fn seal_uses_fresh_nonce_each_time() {
    let a = seal(&key(2), b"same input").unwrap();
    let b = seal(&key(2), b"same input").unwrap();
    assert_ne!(a, b, "two seals of the same plaintext must differ");

    let nonce_a = &BASE64.decode(a.as_str()).unwrap()[..12];
    let nonce_b = &BASE64.decode(b.as_str()).unwrap()[..12];
    assert_ne!(nonce_a, nonce_b);
}

#[test]
fn open_with_wrong_key_fails() {
    let field = seal(&key(0x11), b"TOP_SECRET").unwrap();
    let result = open(&key(0x22), &field);
    assert!(matches!(result, Err(VaultError::DecryptionFailed)));
}

#[test]
fn flipping_any_byte_is_detected() {
    let field = seal(&key(0x33), b"do not tamper").unwrap();
    let raw = BASE64.decode(field.as_str()).unwrap();

    for i in 0..raw.len() {
        let mut tampered = raw.clone();
        tampered[i] ^= 0x01;
        let tampered = EncryptedField::from_stored(BASE64.encode(&tampered));
        assert!(
            matches!(open(&key(0x33), &tampered), Err(VaultError::DecryptionFailed)),
            "byte {i} flip must fail authentication"
        );
    }
}

#[test]
fn truncated_field_fails() {
    let field = seal(&key(0x44), b"value").unwrap();
    let mut raw = BASE64.decode(field.as_str()).unwrap();
    raw.truncate(raw.len() - 1);
    let truncated = EncryptedField::from_stored(BASE64.encode(&raw));
    assert!(open(&key(0x44), &truncated).is_err());
}

// ---------------------------------------------------------------------------
// Key derivation (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn derive_same_inputs_same_key() {
    let salt = VaultSalt::generate();
    let k1 = derive_key(b"my-passphrase", salt.as_bytes(), &fast()).unwrap();
    let k2 = derive_key(b"my-passphrase", salt.as_bytes(), &fast()).unwrap();
    assert_eq!(k1.as_bytes(), k2.as_bytes());
}

#[test]
fn derive_different_salts_different_keys() {
    let k1 = derive_key(b"same", VaultSalt::generate().as_bytes(), &fast()).unwrap();
    let k2 = derive_key(b"same", VaultSalt::generate().as_bytes(), &fast()).unwrap();
    assert_ne!(k1.as_bytes(), k2.as_bytes());
}

#[test]
fn derive_different_passwords_different_keys() {
    let salt = VaultSalt::generate();
    let k1 = derive_key(b"password-one", salt.as_bytes(), &fast()).unwrap();
    let k2 = derive_key(b"password-two", salt.as_bytes(), &fast()).unwrap();
    assert_ne!(k1.as_bytes(), k2.as_bytes());
}

#[test]
fn derived_key_seals_and_opens() {
    let salt = VaultSalt::generate();
    let k = derive_key(b"pw", salt.as_bytes(), &fast()).unwrap();
    let again = derive_key(b"pw", salt.as_bytes(), &fast()).unwrap();

    let field = seal(&k, b"secret").unwrap();
    assert_eq!(open(&again, &field).unwrap().as_slice(), b"secret");
}

#[test]
fn derive_rejects_invalid_parameters() {
    assert!(matches!(
        derive_key(b"pw", b"", &fast()),
        Err(VaultError::KeyDerivationFailed(_))
    ));

    let zero_iterations = KdfParams {
        iterations: 0,
        ..fast()
    };
    assert!(matches!(
        derive_key(b"pw", VaultSalt::generate().as_bytes(), &zero_iterations),
        Err(VaultError::KeyDerivationFailed(_))
    ));
}
