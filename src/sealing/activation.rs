//! Activation-time password verification.
//!
//! The beneficiary proves knowledge of the recovery password by sending
//! `KDF(password, saltCr)`. The verifying authority compares it with the
//! stored `passwordHashCr`. Because `saltCr` is drawn independently of
//! `saltKek`, neither value helps anyone derive the KEK or the DEK.
//!
//! ```text
//! backend  --{ saltCr }-->                      client
//! client   --{ secretId, clientHash }-->        backend
//! ```

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{derive_key_with, CryptoProvider, OsCryptoProvider, KEY_LEN};
use crate::errors::{HeirVaultError, Result};

use super::payload::{decode_text, encode_text};

/// The backend's answer to an activation lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationChallenge {
    #[serde(default)]
    pub salt_cr: Option<String>,
}

impl ActivationChallenge {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| HeirVaultError::SerializationError(format!("activation challenge: {e}")))
    }

    /// Decode the salt, rejecting a missing or empty one.
    pub fn salt(&self) -> Result<Vec<u8>> {
        match self.salt_cr.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => decode_text(s),
            _ => Err(HeirVaultError::InputError(
                "no saltCr received from server".into(),
            )),
        }
    }
}

/// Body submitted to the verification collaborator. Never contains the
/// password itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRequest {
    pub secret_id: String,
    pub client_hash: String,
}

impl ActivationRequest {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HeirVaultError::SerializationError(format!("activation request: {e}")))
    }
}

/// Compute the encoded client hash with the OS provider.
pub fn client_hash(password: &str, salt_cr: &[u8]) -> Result<String> {
    client_hash_with(&OsCryptoProvider, password, salt_cr)
}

/// Compute `encode(KDF(password, saltCr))` through an explicit provider.
pub fn client_hash_with<P: CryptoProvider + ?Sized>(
    provider: &P,
    password: &str,
    salt_cr: &[u8],
) -> Result<String> {
    let bits = derive_key_with(provider, password, salt_cr)?;
    Ok(encode_text(bits.as_slice()))
}

/// Build the activation request with the OS provider.
pub fn activation_request(
    secret_id: &str,
    password: &str,
    salt_cr: &[u8],
) -> Result<ActivationRequest> {
    activation_request_with(&OsCryptoProvider, secret_id, password, salt_cr)
}

/// Build the `{ secretId, clientHash }` request through an explicit provider.
pub fn activation_request_with<P: CryptoProvider + ?Sized>(
    provider: &P,
    secret_id: &str,
    password: &str,
    salt_cr: &[u8],
) -> Result<ActivationRequest> {
    let secret_id = secret_id.trim();
    if secret_id.is_empty() {
        return Err(HeirVaultError::InputError("secret id cannot be empty".into()));
    }

    let client_hash = client_hash_with(provider, password, salt_cr)?;
    debug!(secret_id, "built activation request");

    Ok(ActivationRequest {
        secret_id: secret_id.to_string(),
        client_hash,
    })
}

/// The stored `passwordHashCr`, as held by the verifying authority.
///
/// Comparison is constant-time so response timing reveals nothing about
/// how many leading bytes of a guess were right.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ActivationVerifier {
    hash: Vec<u8>,
}

impl ActivationVerifier {
    pub fn new(password_hash_cr: &[u8]) -> Result<Self> {
        if password_hash_cr.len() != KEY_LEN {
            return Err(HeirVaultError::InputError(format!(
                "password hash must be {KEY_LEN} bytes, got {}",
                password_hash_cr.len()
            )));
        }
        Ok(Self {
            hash: password_hash_cr.to_vec(),
        })
    }

    /// Check a submitted, still-encoded client hash.
    pub fn matches(&self, client_hash: &str) -> Result<bool> {
        let candidate = decode_text(client_hash)?;
        Ok(self.hash.as_slice().ct_eq(candidate.as_slice()).into())
    }
}

impl std::fmt::Debug for ActivationVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ActivationVerifier([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_without_salt_is_input_error() {
        let challenge = ActivationChallenge::from_json("{}").unwrap();
        assert!(matches!(
            challenge.salt(),
            Err(HeirVaultError::InputError(_))
        ));

        let challenge = ActivationChallenge::from_json(r#"{"saltCr":"  "}"#).unwrap();
        assert!(matches!(
            challenge.salt(),
            Err(HeirVaultError::InputError(_))
        ));
    }

    #[test]
    fn challenge_decodes_salt() {
        let json = format!(r#"{{"saltCr":"{}"}}"#, encode_text(&[7u8; 16]));
        let challenge = ActivationChallenge::from_json(&json).unwrap();
        assert_eq!(challenge.salt().unwrap(), vec![7u8; 16]);
    }

    #[test]
    fn challenge_salt_of_wrong_length_is_input_error() {
        for len in [8usize, 15, 17, 32] {
            let json = format!(r#"{{"saltCr":"{}"}}"#, encode_text(&vec![7u8; len]));
            let salt = ActivationChallenge::from_json(&json).unwrap().salt().unwrap();

            let err = client_hash("CorrectHorse9!", &salt).unwrap_err();
            assert!(matches!(err, HeirVaultError::InputError(_)), "{len} bytes");
            let err = activation_request("secret-1", "CorrectHorse9!", &salt).unwrap_err();
            assert!(matches!(err, HeirVaultError::InputError(_)), "{len} bytes");
        }
    }

    #[test]
    fn empty_secret_id_rejected() {
        let err = activation_request("  ", "password", &[0u8; 16]).unwrap_err();
        assert!(matches!(err, HeirVaultError::InputError(_)));
    }

    #[test]
    fn request_serializes_camel_case() {
        let req = ActivationRequest {
            secret_id: "abc".into(),
            client_hash: "AAAA".into(),
        };
        let value: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
        assert_eq!(value["secretId"], "abc");
        assert_eq!(value["clientHash"], "AAAA");
    }

    #[test]
    fn verifier_rejects_wrong_length_and_mismatch() {
        assert!(ActivationVerifier::new(&[1u8; 16]).is_err());

        let verifier = ActivationVerifier::new(&[1u8; KEY_LEN]).unwrap();
        assert!(verifier.matches(&encode_text(&[1u8; KEY_LEN])).unwrap());
        assert!(!verifier.matches(&encode_text(&[2u8; KEY_LEN])).unwrap());
        // Length mismatch is just "no", never a panic.
        assert!(!verifier.matches(&encode_text(&[1u8; 8])).unwrap());
    }
}
