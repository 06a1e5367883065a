//! Client-side envelope encryption for secrets left to a beneficiary.
//!
//! An owner seals a secret under a recovery password; the backend keeps
//! only the resulting envelopes, the salts and a one-way activation
//! verifier. The beneficiary later opens it with the same password.
//!
//! ```no_run
//! use heirvault::sealing::{open_secret, seal_secret};
//!
//! let payload = seal_secret(b"my bank password is 1234", "CorrectHorse9!")?;
//! let secret = open_secret("CorrectHorse9!", &payload.stored_secret())?;
//! assert_eq!(secret.as_slice(), b"my bank password is 1234");
//! # Ok::<(), heirvault::errors::HeirVaultError>(())
//! ```

#[cfg(feature = "audit-log")]
pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod logging;
pub mod sealing;
