//! The envelope scheme itself: sealing a secret for a beneficiary,
//! opening it again, and the activation-time password check.

pub mod activation;
pub mod instructions;
pub mod open;
pub mod payload;
pub mod seal;

pub use activation::{
    activation_request, activation_request_with, client_hash, client_hash_with,
    ActivationChallenge, ActivationRequest, ActivationVerifier,
};
pub use instructions::RecoveryInstructions;
pub use open::{open_secret, open_secret_with};
pub use payload::{decode_text, encode_text, SecretRegistration, StoredSecret, TransportPayload};
pub use seal::{seal_secret, seal_secret_with};
