//! Cryptographic building blocks for HeirVault.
//!
//! This module provides:
//! - The platform capability interface and its OS implementation (`provider`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - AES-256-GCM IV-prefixed envelopes (`envelope`)
//! - Zeroizing DEK / KEK key types (`keys`)

pub mod envelope;
pub mod kdf;
pub mod keys;
pub mod provider;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encode, decode, derive_key, ...};
pub use envelope::{decode, decode_with, encode, encode_with, IV_LEN, TAG_LEN};
pub use kdf::{
    derive_key, derive_key_with, generate_salt, KdfParams, Salt, KEY_LEN, PBKDF2_ITERATIONS,
    SALT_LEN,
};
pub use keys::{DataEncryptionKey, KeyEncryptionKey};
pub use provider::{CryptoProvider, OsCryptoProvider};
