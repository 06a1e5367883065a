//! Platform capabilities the envelope scheme is built on.
//!
//! Everything above this layer (KDF, envelope codec, orchestrators) goes
//! through `CryptoProvider`, so tests can swap in a seeded random source
//! and a cheap derivation without touching the scheme itself.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use hmac::Hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;

use super::envelope::IV_LEN;
use super::kdf::KEY_LEN;
use crate::errors::{HeirVaultError, Result};

/// Randomness, password-based derivation and AEAD primitives.
pub trait CryptoProvider {
    /// Fill `dest` with cryptographically secure random bytes.
    fn random_bytes(&self, dest: &mut [u8]) -> Result<()>;

    /// PBKDF2-HMAC-SHA256 over `password` and `salt`, writing `out.len()` bytes.
    fn derive_key(&self, password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8])
        -> Result<()>;

    /// AES-256-GCM encryption without associated data. Returns ciphertext || tag.
    fn aead_encrypt(
        &self,
        key: &[u8; KEY_LEN],
        iv: &[u8; IV_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>>;

    /// AES-256-GCM decryption. A tag mismatch yields `AuthenticationFailure`.
    fn aead_decrypt(
        &self,
        key: &[u8; KEY_LEN],
        iv: &[u8; IV_LEN],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>>;
}

/// Production provider backed by the OS random source and RustCrypto.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsCryptoProvider;

impl CryptoProvider for OsCryptoProvider {
    fn random_bytes(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| HeirVaultError::CryptoUnavailable(format!("OS random source: {e}")))
    }

    fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        out: &mut [u8],
    ) -> Result<()> {
        pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, out)
            .map_err(|e| HeirVaultError::CryptoUnavailable(format!("PBKDF2 failed: {e}")))
    }

    fn aead_encrypt(
        &self,
        key: &[u8; KEY_LEN],
        iv: &[u8; IV_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| HeirVaultError::CryptoUnavailable(format!("invalid key length: {e}")))?;

        cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| HeirVaultError::CryptoUnavailable(format!("AES-GCM encryption: {e}")))
    }

    fn aead_decrypt(
        &self,
        key: &[u8; KEY_LEN],
        iv: &[u8; IV_LEN],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| HeirVaultError::CryptoUnavailable(format!("invalid key length: {e}")))?;

        // The aead crate never hands back partial plaintext on a bad tag.
        cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|_| HeirVaultError::AuthenticationFailure)
    }
}
