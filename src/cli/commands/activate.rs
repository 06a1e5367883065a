//! `heirvault activate`: prove the recovery password without revealing it.
//!
//! Prints the `{ secretId, clientHash }` body for the verification
//! endpoint. Submitting it is left to whatever transport the caller uses.

use std::fs;
use std::path::Path;

use crate::cli::{audit, prompt_password, Cli};
use crate::errors::{HeirVaultError, Result};
use crate::sealing::{activation_request, decode_text, ActivationChallenge};

/// Execute the `activate` command.
pub fn execute(
    cli: &Cli,
    secret_id: &str,
    salt_cr: Option<&str>,
    challenge: Option<&str>,
) -> Result<()> {
    let salt = match (salt_cr, challenge) {
        (Some(s), _) => decode_text(s)?,
        (None, Some(path)) => load_challenge(Path::new(path))?.salt()?,
        (None, None) => {
            return Err(HeirVaultError::InputError(
                "pass --salt-cr or --challenge".into(),
            ))
        }
    };

    let password = prompt_password()?;
    let request = activation_request(secret_id, &password, &salt)?;

    println!("{}", request.to_json()?);
    audit(cli, "activate", Some(secret_id), Some("request built"));

    Ok(())
}

fn load_challenge(path: &Path) -> Result<ActivationChallenge> {
    if !path.exists() {
        return Err(HeirVaultError::PayloadNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    ActivationChallenge::from_json(&contents)
}
