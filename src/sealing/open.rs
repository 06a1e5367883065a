//! Beneficiary side: recover the plaintext from a stored payload.

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto::{decode_with, CryptoProvider, KeyEncryptionKey, OsCryptoProvider};
use crate::errors::{HeirVaultError, Result};

use super::payload::StoredSecret;

/// Open a stored secret with the OS provider.
pub fn open_secret(recovery_password: &str, stored: &StoredSecret) -> Result<Zeroizing<Vec<u8>>> {
    open_secret_with(&OsCryptoProvider, recovery_password, stored)
}

/// Open a stored secret through an explicit provider.
///
/// The KEK is re-derived from the password on every call. The content
/// envelope is only touched after the DEK unwraps cleanly, so a wrong
/// password is rejected before any content decryption is attempted.
pub fn open_secret_with<P: CryptoProvider + ?Sized>(
    provider: &P,
    recovery_password: &str,
    stored: &StoredSecret,
) -> Result<Zeroizing<Vec<u8>>> {
    let kek = KeyEncryptionKey::derive(provider, recovery_password, &stored.salt_kek)?;
    debug!("derived KEK");

    // Wrong password and damaged envelope must look identical here.
    let dek = kek
        .unwrap_dek(provider, &stored.encrypted_dek)
        .map_err(|e| match e {
            HeirVaultError::CryptoUnavailable(_) => e,
            _ => {
                warn!("DEK unwrap failed");
                HeirVaultError::AuthenticationFailure
            }
        })?;
    debug!("unwrapped DEK");

    let secret = decode_with(provider, &stored.encrypted_secret, dek.as_bytes())?;
    debug!(len = secret.len(), "decrypted secret content");

    Ok(secret)
}
