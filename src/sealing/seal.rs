//! Owner side: turn a plaintext secret into a storable payload.

use tracing::debug;

use crate::crypto::{
    derive_key_with, encode_with, generate_salt, CryptoProvider, DataEncryptionKey,
    KeyEncryptionKey, OsCryptoProvider,
};
use crate::errors::{HeirVaultError, Result};

use super::payload::TransportPayload;

/// Seal `secret` under `recovery_password` with the OS provider.
pub fn seal_secret(secret: &[u8], recovery_password: &str) -> Result<TransportPayload> {
    seal_secret_with(&OsCryptoProvider, secret, recovery_password)
}

/// Seal `secret` under `recovery_password` through an explicit provider.
///
/// Steps, each consuming the previous one's output:
/// 1. fresh DEK
/// 2. independent `saltKek` and `saltCr`
/// 3. `encryptedSecret = encode(secret, DEK)`
/// 4. `KEK = KDF(password, saltKek)`
/// 5. `encryptedDek = encode(raw(DEK), KEK)`
/// 6. `passwordHashCr = KDF(password, saltCr)` as raw bits
///
/// Any failure aborts the whole operation; no partial payload escapes.
pub fn seal_secret_with<P: CryptoProvider + ?Sized>(
    provider: &P,
    secret: &[u8],
    recovery_password: &str,
) -> Result<TransportPayload> {
    if secret.is_empty() {
        return Err(HeirVaultError::InputError("secret cannot be empty".into()));
    }
    if recovery_password.is_empty() {
        return Err(HeirVaultError::InputError(
            "recovery password cannot be empty".into(),
        ));
    }

    let dek = DataEncryptionKey::generate(provider)?;

    let salt_kek = generate_salt(provider)?;
    let salt_cr = generate_salt(provider)?;
    if salt_kek == salt_cr {
        return Err(HeirVaultError::CryptoUnavailable(
            "random source produced identical salts".into(),
        ));
    }
    debug!("generated DEK and salts");

    let encrypted_secret = encode_with(provider, secret, dek.as_bytes())?;
    debug!(len = encrypted_secret.len(), "encrypted secret content");

    let kek = KeyEncryptionKey::derive(provider, recovery_password, salt_kek.as_bytes())?;
    let encrypted_dek = kek.wrap(provider, &dek)?;
    debug!(len = encrypted_dek.len(), "wrapped DEK under KEK");

    // Same derivation, other salt; only the raw bits leave this function.
    let password_hash_cr = derive_key_with(provider, recovery_password, salt_cr.as_bytes())?;
    debug!("derived activation verifier");

    Ok(TransportPayload::new(
        encrypted_secret,
        encrypted_dek,
        salt_kek.as_bytes().to_vec(),
        salt_cr.as_bytes().to_vec(),
        password_hash_cr.to_vec(),
    ))
}
