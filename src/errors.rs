use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in HeirVault.
#[derive(Debug, Error)]
pub enum HeirVaultError {
    // --- Crypto errors ---
    #[error("Invalid input: {0}")]
    InputError(String),

    #[error("Cryptography unavailable: {0}")]
    CryptoUnavailable(String),

    #[error("Authentication failed: wrong password or corrupted data")]
    AuthenticationFailure,

    #[error("Encoding error: {0}")]
    EncodingError(String),

    // --- Payload file errors ---
    #[error("Payload not found at {0}")]
    PayloadNotFound(PathBuf),

    #[error("Payload already exists at {0} (use --force to overwrite)")]
    PayloadAlreadyExists(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Audit error: {0}")]
    AuditError(String),
}

impl HeirVaultError {
    /// True for failures caused by bad caller input rather than by the
    /// host environment; the whole flow can be retried with new input.
    pub fn is_input_related(&self) -> bool {
        matches!(
            self,
            Self::InputError(_) | Self::AuthenticationFailure | Self::EncodingError(_)
        )
    }
}

/// Convenience type alias for HeirVault results.
pub type Result<T> = std::result::Result<T, HeirVaultError>;
