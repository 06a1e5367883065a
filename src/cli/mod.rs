//! CLI module: Clap argument parser, output helpers, and command implementations.
//!
//! This is a thin adapter: every command gathers input, calls one
//! operation from `crate::sealing`, and prints the result.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{HeirVaultError, Result};

/// Environment variable that supplies the recovery password non-interactively.
pub const PASSWORD_ENV: &str = "HEIRVAULT_PASSWORD";

/// HeirVault CLI: seal secrets for a beneficiary.
#[derive(Parser)]
#[command(
    name = "heirvault",
    about = "Client-side envelope encryption for secrets you leave behind",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Payload directory (default: payload_dir from .heirvault.toml, else .heirvault)
    #[arg(long, global = true)]
    pub payload_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a secret under a recovery password and write the payload
    Seal {
        /// Payload name (file is written to <payload_dir>/<NAME>.json)
        name: String,

        /// Secret value (omit for a hidden interactive prompt)
        #[arg(long)]
        secret: Option<String>,

        /// Print the JSON body to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Overwrite an existing payload file
        #[arg(short, long)]
        force: bool,

        /// Beneficiary contact; emits a full registration body
        #[arg(long, requires = "owner_contact")]
        beneficiary: Option<String>,

        /// Owner contact for alerts (with --beneficiary)
        #[arg(long, requires = "beneficiary")]
        owner_contact: Option<String>,

        /// Grace period in seconds (with --beneficiary)
        #[arg(long, default_value = "0")]
        grace_period: u64,
    },

    /// Decrypt a stored payload with the recovery password
    Open {
        /// Path to a JSON file with encryptedSecret, encryptedDek and saltKek
        file: String,
    },

    /// Build the activation request proving the recovery password
    Activate {
        /// Secret id issued by the backend
        secret_id: String,

        /// Base64 saltCr issued by the backend
        #[arg(long, conflicts_with = "challenge", required_unless_present = "challenge")]
        salt_cr: Option<String>,

        /// JSON file containing the backend's { "saltCr": ... } response
        #[arg(long)]
        challenge: Option<String>,
    },

    /// Print recovery instructions for a beneficiary
    Instructions {
        /// Secret id issued by the backend
        secret_id: String,
    },

    /// Show the fields of a payload file and their sizes
    Inspect {
        /// Path to the payload JSON file
        file: String,
    },

    /// View the audit log of sealing operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Show version information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.heirvault.toml` from the working directory.
pub fn settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the payload directory: `--payload-dir` wins over the config file.
pub fn payload_dir(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match &cli.payload_dir {
        Some(dir) => Ok(cwd.join(dir)),
        None => Ok(cwd.join(Settings::load(&cwd)?.payload_dir)),
    }
}

/// Get the recovery password, trying in order:
/// 1. `HEIRVAULT_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter recovery password")
        .interact()
        .map_err(|e| HeirVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new recovery password with confirmation (used by `seal`).
///
/// Also respects `HEIRVAULT_PASSWORD` for scripted/CI usage.
/// Enforces `min_len`.
pub fn prompt_new_password(min_len: usize) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            check_password_len(&pw, min_len)?;
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose recovery password")
                .with_confirmation(
                    "Confirm recovery password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| HeirVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if let Err(e) = check_password_len(&password, min_len) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(password);
    }
}

/// Prompt for the secret itself without echoing it.
pub fn prompt_secret() -> Result<Zeroizing<String>> {
    let secret = dialoguer::Password::new()
        .with_prompt("Enter the secret to seal")
        .allow_empty_password(false)
        .interact()
        .map_err(|e| HeirVaultError::CommandFailed(format!("secret prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

/// Reject passwords shorter than `min_len` characters.
pub fn check_password_len(password: &str, min_len: usize) -> Result<()> {
    if password.chars().count() < min_len {
        return Err(HeirVaultError::InputError(format!(
            "password must be at least {min_len} characters"
        )));
    }
    Ok(())
}

/// Validate a payload name used as a file stem.
///
/// Allowed: ASCII letters, digits, hyphens, underscores. Must not be
/// empty or longer than 64 characters.
pub fn validate_payload_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(HeirVaultError::InputError(
            "payload name cannot be empty".into(),
        ));
    }

    if name.len() > 64 {
        return Err(HeirVaultError::InputError(
            "payload name cannot exceed 64 characters".into(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(HeirVaultError::InputError(format!(
            "payload name '{name}' is invalid: only letters, digits, '-' and '_' are allowed"
        )));
    }

    Ok(())
}

/// Record an audit event when the `audit-log` feature is enabled.
pub fn audit(cli: &Cli, op: &str, subject: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    crate::audit::record(cli, op, subject, details);

    #[cfg(not(feature = "audit-log"))]
    let _ = (cli, op, subject, details);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_payload_names() {
        assert!(validate_payload_name("deed").is_ok());
        assert!(validate_payload_name("bank-login").is_ok());
        assert!(validate_payload_name("Wallet_2").is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(validate_payload_name("").is_err());
    }

    #[test]
    fn rejects_path_like_names() {
        assert!(validate_payload_name("../etc/passwd").is_err());
        assert!(validate_payload_name("a/b").is_err());
        assert!(validate_payload_name("deed.json").is_err());
        assert!(validate_payload_name("two words").is_err());
    }

    #[test]
    fn rejects_too_long_name() {
        assert!(validate_payload_name(&"a".repeat(65)).is_err());
    }

    #[test]
    fn password_length_counts_characters() {
        assert!(check_password_len("CorrectHorse9!", 8).is_ok());
        assert!(check_password_len("short", 8).is_err());
        // Four multi-byte characters are still four characters.
        assert!(check_password_len("ñññññ", 6).is_err());
    }
}
