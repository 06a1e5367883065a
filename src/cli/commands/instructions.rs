//! `heirvault instructions`: print recovery instructions for a beneficiary.

use crate::cli::settings;
use crate::errors::{HeirVaultError, Result};
use crate::sealing::RecoveryInstructions;

/// Execute the `instructions` command.
pub fn execute(secret_id: &str) -> Result<()> {
    let secret_id = secret_id.trim();
    if secret_id.is_empty() {
        return Err(HeirVaultError::InputError("secret id cannot be empty".into()));
    }

    let settings = settings()?;
    let instructions = RecoveryInstructions::new(secret_id, settings.frontend_base_url.as_deref());
    println!("{instructions}");

    Ok(())
}
