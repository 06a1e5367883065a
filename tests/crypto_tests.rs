//! Integration tests for the HeirVault crypto module.

use std::collections::HashSet;

use heirvault::crypto::{
    decode, derive_key, encode, generate_salt, DataEncryptionKey, KeyEncryptionKey,
    OsCryptoProvider, IV_LEN, KEY_LEN, SALT_LEN, TAG_LEN,
};
use heirvault::errors::HeirVaultError;

// ---------------------------------------------------------------------------
// Envelope codec
// ---------------------------------------------------------------------------

#[test]
fn encode_decode_roundtrip() {
    let key = [0xABu8; KEY_LEN];
    let plaintext = b"my bank password is 1234";

    let envelope = encode(plaintext, &key).expect("encode should succeed");
    assert_eq!(envelope.len(), IV_LEN + plaintext.len() + TAG_LEN);

    let recovered = decode(&envelope, &key).expect("decode should succeed");
    assert_eq!(recovered.as_slice(), plaintext);
}

#[test]
fn encode_produces_different_envelope_each_time() {
    let key = [0xCDu8; KEY_LEN];
    let plaintext = b"same input";

    let e1 = encode(plaintext, &key).expect("encode 1");
    let e2 = encode(plaintext, &key).expect("encode 2");

    assert_ne!(e1, e2, "two envelopes of the same plaintext must differ");
}

#[test]
fn ivs_never_repeat_under_a_fixed_key() {
    let key = [0x5Eu8; KEY_LEN];
    let mut ivs = HashSet::new();

    for _ in 0..10_000 {
        let envelope = encode(b"x", &key).expect("encode");
        assert!(
            ivs.insert(envelope[..IV_LEN].to_vec()),
            "IV reused under the same key"
        );
    }
}

#[test]
fn decode_with_wrong_key_fails() {
    let envelope = encode(b"TOP_SECRET=42", &[0x11u8; KEY_LEN]).expect("encode");
    let err = decode(&envelope, &[0x22u8; KEY_LEN]).unwrap_err();
    assert!(matches!(err, HeirVaultError::AuthenticationFailure));
}

#[test]
fn decode_with_truncated_data_fails() {
    let err = decode(&[0u8; 5], &[0xAAu8; KEY_LEN]).unwrap_err();
    assert!(matches!(err, HeirVaultError::EncodingError(_)));
}

#[test]
fn decode_with_corrupted_ciphertext_fails() {
    let key = [0xBBu8; KEY_LEN];
    let mut envelope = encode(b"VALUE=abc", &key).expect("encode");
    envelope[IV_LEN + 2] ^= 0xFF;

    let err = decode(&envelope, &key).unwrap_err();
    assert!(matches!(err, HeirVaultError::AuthenticationFailure));
}

#[test]
fn decode_with_corrupted_tag_fails() {
    let key = [0xBCu8; KEY_LEN];
    let mut envelope = encode(b"VALUE=abc", &key).expect("encode");
    let last = envelope.len() - 1;
    envelope[last] ^= 0x01;

    assert!(decode(&envelope, &key).is_err());
}

// ---------------------------------------------------------------------------
// Key derivation (PBKDF2, production parameters)
// ---------------------------------------------------------------------------

#[test]
fn derive_key_same_inputs_same_output() {
    let salt = generate_salt(&OsCryptoProvider).unwrap();

    let k1 = derive_key("CorrectHorse9!", salt.as_bytes()).expect("derive 1");
    let k2 = derive_key("CorrectHorse9!", salt.as_bytes()).expect("derive 2");

    assert_eq!(*k1, *k2, "same password + salt must produce the same key");
}

#[test]
fn derive_key_different_salts_and_passwords_differ() {
    let salt1 = [1u8; SALT_LEN];
    let salt2 = [2u8; SALT_LEN];

    let base = derive_key("same-password", &salt1).expect("derive base");
    let other_salt = derive_key("same-password", &salt2).expect("derive salt2");
    let other_pw = derive_key("other-password", &salt1).expect("derive pw2");

    assert_ne!(*base, *other_salt, "different salts must produce different keys");
    assert_ne!(*base, *other_pw, "different passwords must produce different keys");
}

// ---------------------------------------------------------------------------
// DEK / KEK
// ---------------------------------------------------------------------------

#[test]
fn kek_wraps_and_unwraps_dek() {
    let salt = [9u8; SALT_LEN];
    let dek = DataEncryptionKey::generate(&OsCryptoProvider).unwrap();
    let kek = KeyEncryptionKey::derive(&OsCryptoProvider, "hunter2hunter2", &salt).unwrap();

    let wrapped = kek.wrap(&OsCryptoProvider, &dek).unwrap();
    assert_eq!(wrapped.len(), IV_LEN + KEY_LEN + TAG_LEN);

    let unwrapped = kek.unwrap_dek(&OsCryptoProvider, &wrapped).unwrap();
    assert_eq!(unwrapped.as_bytes(), dek.as_bytes());
}

#[test]
fn kek_debug_is_redacted() {
    let kek = KeyEncryptionKey::derive(&OsCryptoProvider, "pw", &[3u8; SALT_LEN]).unwrap();
    assert_eq!(format!("{kek:?}"), "KeyEncryptionKey([REDACTED])");
}
