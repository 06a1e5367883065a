//! Test doubles for `CryptoProvider`.
//!
//! `SeededProvider` is deterministic and fast: randomness comes from a
//! seeded `StdRng` and derivation runs a single PBKDF2 round whatever
//! count is requested. It records every call so tests can assert on the
//! parameters the scheme asked for.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use heirvault::crypto::{CryptoProvider, OsCryptoProvider, IV_LEN, KEY_LEN};
use heirvault::errors::{HeirVaultError, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub struct SeededProvider {
    rng: Mutex<StdRng>,
    kdf_calls: Mutex<Vec<(u32, usize)>>,
    random_calls: AtomicUsize,
    decrypt_calls: AtomicUsize,
}

impl SeededProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            kdf_calls: Mutex::new(Vec::new()),
            random_calls: AtomicUsize::new(0),
            decrypt_calls: AtomicUsize::new(0),
        }
    }

    /// (iterations, output length) for every derivation so far.
    pub fn kdf_calls(&self) -> Vec<(u32, usize)> {
        self.kdf_calls.lock().unwrap().clone()
    }

    pub fn random_calls(&self) -> usize {
        self.random_calls.load(Ordering::SeqCst)
    }

    pub fn decrypt_calls(&self) -> usize {
        self.decrypt_calls.load(Ordering::SeqCst)
    }
}

impl CryptoProvider for SeededProvider {
    fn random_bytes(&self, dest: &mut [u8]) -> Result<()> {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        self.rng.lock().unwrap().fill_bytes(dest);
        Ok(())
    }

    fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        out: &mut [u8],
    ) -> Result<()> {
        self.kdf_calls.lock().unwrap().push((iterations, out.len()));
        OsCryptoProvider.derive_key(password, salt, 1, out)
    }

    fn aead_encrypt(
        &self,
        key: &[u8; KEY_LEN],
        iv: &[u8; IV_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        OsCryptoProvider.aead_encrypt(key, iv, plaintext)
    }

    fn aead_decrypt(
        &self,
        key: &[u8; KEY_LEN],
        iv: &[u8; IV_LEN],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        self.decrypt_calls.fetch_add(1, Ordering::SeqCst);
        OsCryptoProvider.aead_decrypt(key, iv, ciphertext)
    }
}

/// A random source stuck on one byte value.
pub struct StuckRandomProvider(pub u8);

impl CryptoProvider for StuckRandomProvider {
    fn random_bytes(&self, dest: &mut [u8]) -> Result<()> {
        dest.fill(self.0);
        Ok(())
    }

    fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        _iterations: u32,
        out: &mut [u8],
    ) -> Result<()> {
        OsCryptoProvider.derive_key(password, salt, 1, out)
    }

    fn aead_encrypt(
        &self,
        key: &[u8; KEY_LEN],
        iv: &[u8; IV_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        OsCryptoProvider.aead_encrypt(key, iv, plaintext)
    }

    fn aead_decrypt(
        &self,
        key: &[u8; KEY_LEN],
        iv: &[u8; IV_LEN],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        OsCryptoProvider.aead_decrypt(key, iv, ciphertext)
    }
}

/// A host with no usable random source.
pub struct NoRandomProvider;

impl CryptoProvider for NoRandomProvider {
    fn random_bytes(&self, _dest: &mut [u8]) -> Result<()> {
        Err(HeirVaultError::CryptoUnavailable("no entropy source".into()))
    }

    fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        _iterations: u32,
        out: &mut [u8],
    ) -> Result<()> {
        OsCryptoProvider.derive_key(password, salt, 1, out)
    }

    fn aead_encrypt(
        &self,
        key: &[u8; KEY_LEN],
        iv: &[u8; IV_LEN],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        OsCryptoProvider.aead_encrypt(key, iv, plaintext)
    }

    fn aead_decrypt(
        &self,
        key: &[u8; KEY_LEN],
        iv: &[u8; IV_LEN],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        OsCryptoProvider.aead_decrypt(key, iv, ciphertext)
    }
}
