//! `heirvault open`: decrypt a stored payload and print the secret.

use std::io::Write;
use std::path::Path;

use crate::cli::{audit, prompt_password, Cli};
use crate::errors::{HeirVaultError, Result};
use crate::sealing::{open_secret, StoredSecret};

/// Execute the `open` command.
pub fn execute(cli: &Cli, file: &str) -> Result<()> {
    let stored = StoredSecret::load(Path::new(file))?;
    let password = prompt_password()?;

    let secret = match open_secret(&password, &stored) {
        Ok(secret) => secret,
        Err(e) => {
            let details = match e {
                HeirVaultError::AuthenticationFailure => "authentication failed",
                _ => "failed",
            };
            audit(cli, "open", Some(file), Some(details));
            return Err(e);
        }
    };
    audit(cli, "open", Some(file), Some("decrypted"));

    // Secrets are not guaranteed to be UTF-8; write the raw bytes.
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&secret)?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;

    Ok(())
}
