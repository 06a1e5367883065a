//! Key material for the DEK/KEK envelope pattern.
//!
//! - A **DEK** (data encryption key) is random, generated fresh for every
//!   secret, and encrypts the secret content exactly once.
//! - A **KEK** (key encryption key) is derived from the recovery password
//!   and `saltKek`; it wraps the exported DEK bytes and is never stored.
//!
//! Both wipe their bytes when dropped. Export and import of the DEK go
//! through `Zeroizing` buffers so raw key bytes never outlive their use.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::envelope;
use super::kdf::{self, KEY_LEN};
use super::provider::CryptoProvider;
use crate::errors::{HeirVaultError, Result};

/// Random per-secret AES-256-GCM key.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DataEncryptionKey {
    bytes: [u8; KEY_LEN],
}

impl DataEncryptionKey {
    /// Generate a fresh DEK from the provider's random source.
    pub fn generate<P: CryptoProvider + ?Sized>(provider: &P) -> Result<Self> {
        let mut bytes = [0u8; KEY_LEN];
        provider.random_bytes(&mut bytes)?;
        Ok(Self { bytes })
    }

    /// Export the raw key bytes so they can be wrapped under a KEK.
    pub fn export_raw(&self) -> Zeroizing<[u8; KEY_LEN]> {
        Zeroizing::new(self.bytes)
    }

    /// Rebuild a DEK from unwrapped raw bytes.
    pub fn import_raw(raw: &[u8]) -> Result<Self> {
        if raw.len() != KEY_LEN {
            return Err(HeirVaultError::EncodingError(format!(
                "unwrapped key must be {KEY_LEN} bytes, got {}",
                raw.len()
            )));
        }
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(raw);
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DataEncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DataEncryptionKey([REDACTED])")
    }
}

/// Password-derived key that wraps and unwraps the DEK.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyEncryptionKey {
    bytes: [u8; KEY_LEN],
}

impl KeyEncryptionKey {
    /// Derive the KEK from the recovery password and `saltKek`.
    pub fn derive<P: CryptoProvider + ?Sized>(
        provider: &P,
        password: &str,
        salt_kek: &[u8],
    ) -> Result<Self> {
        let derived = kdf::derive_key_with(provider, password, salt_kek)?;
        Ok(Self { bytes: *derived })
    }

    /// Encrypt the exported DEK under this KEK.
    pub fn wrap<P: CryptoProvider + ?Sized>(
        &self,
        provider: &P,
        dek: &DataEncryptionKey,
    ) -> Result<Vec<u8>> {
        let raw = dek.export_raw();
        envelope::encode_with(provider, raw.as_slice(), &self.bytes)
    }

    /// Decrypt a wrapped DEK.
    pub fn unwrap_dek<P: CryptoProvider + ?Sized>(
        &self,
        provider: &P,
        encrypted_dek: &[u8],
    ) -> Result<DataEncryptionKey> {
        let raw = envelope::decode_with(provider, encrypted_dek, &self.bytes)?;
        DataEncryptionKey::import_raw(&raw)
    }
}

impl std::fmt::Debug for KeyEncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyEncryptionKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::OsCryptoProvider;

    #[test]
    fn export_import_preserves_bytes() {
        let dek = DataEncryptionKey::generate(&OsCryptoProvider).unwrap();
        let raw = dek.export_raw();
        let back = DataEncryptionKey::import_raw(raw.as_slice()).unwrap();
        assert_eq!(dek.as_bytes(), back.as_bytes());
    }

    #[test]
    fn import_rejects_wrong_length() {
        let err = DataEncryptionKey::import_raw(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, HeirVaultError::EncodingError(_)));
    }

    #[test]
    fn fresh_deks_differ() {
        let a = DataEncryptionKey::generate(&OsCryptoProvider).unwrap();
        let b = DataEncryptionKey::generate(&OsCryptoProvider).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn debug_is_redacted() {
        let dek = DataEncryptionKey::import_raw(&[9u8; KEY_LEN]).unwrap();
        assert_eq!(format!("{dek:?}"), "DataEncryptionKey([REDACTED])");
    }
}
