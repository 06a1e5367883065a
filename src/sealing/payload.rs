//! JSON shapes exchanged with the backend.
//!
//! Byte fields are standard base64 (with padding) and field names are
//! camelCase, matching what the browser client has always sent:
//!
//! ```text
//! { "encryptedSecret", "encryptedDek", "saltKek", "saltCr", "passwordHashCr" }
//! ```

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{HeirVaultError, Result};

/// Encode bytes for JSON transport.
pub fn encode_text(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode a transport string back to bytes.
pub fn decode_text(text: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(text.trim())
        .map_err(|e| HeirVaultError::EncodingError(format!("invalid base64: {e}")))
}

/// Everything the backend stores for one secret.
///
/// Built once by `seal_secret` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportPayload {
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    encrypted_secret: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    encrypted_dek: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    salt_kek: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    salt_cr: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    password_hash_cr: Vec<u8>,
}

impl TransportPayload {
    pub(crate) fn new(
        encrypted_secret: Vec<u8>,
        encrypted_dek: Vec<u8>,
        salt_kek: Vec<u8>,
        salt_cr: Vec<u8>,
        password_hash_cr: Vec<u8>,
    ) -> Self {
        Self {
            encrypted_secret,
            encrypted_dek,
            salt_kek,
            salt_cr,
            password_hash_cr,
        }
    }

    pub fn encrypted_secret(&self) -> &[u8] {
        &self.encrypted_secret
    }

    pub fn encrypted_dek(&self) -> &[u8] {
        &self.encrypted_dek
    }

    pub fn salt_kek(&self) -> &[u8] {
        &self.salt_kek
    }

    pub fn salt_cr(&self) -> &[u8] {
        &self.salt_cr
    }

    pub fn password_hash_cr(&self) -> &[u8] {
        &self.password_hash_cr
    }

    /// The subset of fields needed on the decrypt path.
    pub fn stored_secret(&self) -> StoredSecret {
        StoredSecret {
            encrypted_secret: self.encrypted_secret.clone(),
            encrypted_dek: self.encrypted_dek.clone(),
            salt_kek: self.salt_kek.clone(),
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HeirVaultError::SerializationError(format!("payload: {e}")))
    }

    /// Parse a payload from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(json_error)
    }
}

/// Decrypt-path inputs, as handed back by the retrieval collaborator once
/// it has authorized access.
///
/// Unknown fields are ignored, so a full payload, a registration body or
/// a retrieval response all parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSecret {
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub encrypted_secret: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub encrypted_dek: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt_kek: Vec<u8>,
}

impl StoredSecret {
    /// Parse decrypt-path inputs from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(json_error)
    }

    /// Read and parse a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HeirVaultError::PayloadNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

impl From<&TransportPayload> for StoredSecret {
    fn from(payload: &TransportPayload) -> Self {
        payload.stored_secret()
    }
}

/// Body the owner submits to register a new secret: the cryptographic
/// payload plus contact details the backend needs to run its own flow.
///
/// The core attaches no meaning to the extra fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretRegistration {
    #[serde(flatten)]
    pub payload: TransportPayload,

    pub beneficiary_contact: String,

    pub titular_alert_contact: String,

    pub grace_period_seconds: u64,
}

impl SecretRegistration {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HeirVaultError::SerializationError(format!("registration: {e}")))
    }
}

/// Malformed base64 inside otherwise valid JSON is an encoding problem;
/// anything else is a structural one.
fn json_error(e: serde_json::Error) -> HeirVaultError {
    let msg = e.to_string();
    if msg.contains("base64:") {
        HeirVaultError::EncodingError(msg)
    } else {
        HeirVaultError::SerializationError(msg)
    }
}

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&encode_text(data))
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64
        .decode(s.trim())
        .map_err(|e| serde::de::Error::custom(format!("base64: {e}")))
}
