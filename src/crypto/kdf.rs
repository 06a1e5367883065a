//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The same parameters are used for both salts of a secret: the KEK
//! salt and the activation-verifier salt. Only the salt tells the two
//! derivations apart, never the cost.
//!
//! Parameters are fixed for interoperability with envelopes already
//! stored by the backend; changing any of them makes those unreadable.

use zeroize::Zeroizing;

use super::provider::{CryptoProvider, OsCryptoProvider};
use crate::errors::{HeirVaultError, Result};

/// Length of each salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 600_000;

/// Cost parameters handed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
    pub output_len: usize,
}

impl KdfParams {
    /// The one parameter set the scheme uses.
    pub const STANDARD: KdfParams = KdfParams {
        iterations: PBKDF2_ITERATIONS,
        output_len: KEY_LEN,
    };
}

/// A 16-byte random salt.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Validate and wrap raw salt bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; SALT_LEN] = bytes.try_into().map_err(|_| {
            HeirVaultError::InputError(format!(
                "salt must be exactly {SALT_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salt({} bytes)", SALT_LEN)
    }
}

/// Draw a fresh random salt from `provider`.
pub fn generate_salt<P: CryptoProvider + ?Sized>(provider: &P) -> Result<Salt> {
    let mut salt = [0u8; SALT_LEN];
    provider.random_bytes(&mut salt)?;
    Ok(Salt(salt))
}

/// Derive 32 bytes of key material from `password` and `salt` with the
/// OS provider.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    derive_key_with(&OsCryptoProvider, password, salt)
}

/// Derive 32 bytes of key material through an explicit provider.
///
/// Deterministic: the same password and salt always give the same bytes.
/// Rejects an empty password or a salt that is not `SALT_LEN` bytes
/// before calling into the provider.
pub fn derive_key_with<P: CryptoProvider + ?Sized>(
    provider: &P,
    password: &str,
    salt: &[u8],
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    if password.is_empty() {
        return Err(HeirVaultError::InputError("password cannot be empty".into()));
    }
    let salt = Salt::from_slice(salt)?;

    let params = KdfParams::STANDARD;
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    provider.derive_key(
        password.as_bytes(),
        salt.as_bytes(),
        params.iterations,
        &mut key[..params.output_len],
    )?;

    Ok(key)
}
