//! AES-256-GCM envelope framing.
//!
//! Each call to `encode` draws a fresh random 12-byte IV and prepends it
//! to the ciphertext. `decode` splits the IV back out before decrypting.
//!
//! Layout of an envelope:
//!   [ 12-byte IV | ciphertext + 16-byte auth tag ]

use zeroize::Zeroizing;

use super::kdf::KEY_LEN;
use super::provider::{CryptoProvider, OsCryptoProvider};
use crate::errors::{HeirVaultError, Result};

/// Size of the AES-GCM IV in bytes.
pub const IV_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key` with the OS provider.
pub fn encode(plaintext: &[u8], key: &[u8; KEY_LEN]) -> Result<Vec<u8>> {
    encode_with(&OsCryptoProvider, plaintext, key)
}

/// Decrypt an envelope produced by `encode` with the OS provider.
pub fn decode(envelope: &[u8], key: &[u8; KEY_LEN]) -> Result<Zeroizing<Vec<u8>>> {
    decode_with(&OsCryptoProvider, envelope, key)
}

/// Encrypt `plaintext` under `key`, returning IV || ciphertext || tag.
pub fn encode_with<P: CryptoProvider + ?Sized>(
    provider: &P,
    plaintext: &[u8],
    key: &[u8; KEY_LEN],
) -> Result<Vec<u8>> {
    let mut iv = [0u8; IV_LEN];
    provider.random_bytes(&mut iv)?;

    let ciphertext = provider.aead_encrypt(key, &iv, plaintext)?;

    let mut output = Vec::with_capacity(IV_LEN + ciphertext.len());
    output.extend_from_slice(&iv);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Split the IV off `envelope`, then authenticate and decrypt the rest.
///
/// An envelope shorter than the IV is an `EncodingError`; anything that
/// fails tag verification is an `AuthenticationFailure`.
pub fn decode_with<P: CryptoProvider + ?Sized>(
    provider: &P,
    envelope: &[u8],
    key: &[u8; KEY_LEN],
) -> Result<Zeroizing<Vec<u8>>> {
    if envelope.len() < IV_LEN {
        return Err(HeirVaultError::EncodingError(format!(
            "envelope is {} bytes, shorter than the {IV_LEN}-byte IV",
            envelope.len()
        )));
    }

    let (iv_bytes, ciphertext) = envelope.split_at(IV_LEN);
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(iv_bytes);

    let plaintext = provider.aead_decrypt(key, &iv, ciphertext)?;
    Ok(Zeroizing::new(plaintext))
}
