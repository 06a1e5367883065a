//! `heirvault seal`: encrypt a secret and write the storable payload.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{
    audit, payload_dir, prompt_new_password, prompt_secret, settings, validate_payload_name, Cli,
};
use crate::errors::{HeirVaultError, Result};
use crate::sealing::{seal_secret, SecretRegistration};

/// Arguments of the `seal` command.
pub struct SealArgs<'a> {
    pub name: &'a str,
    pub secret: Option<&'a str>,
    pub stdout: bool,
    pub force: bool,
    pub beneficiary: Option<&'a str>,
    pub owner_contact: Option<&'a str>,
    pub grace_period: u64,
}

/// Execute the `seal` command.
pub fn execute(cli: &Cli, args: &SealArgs<'_>) -> Result<()> {
    validate_payload_name(args.name)?;
    let settings = settings()?;

    let dir = payload_dir(cli)?;
    let path = dir.join(format!("{}.json", args.name));
    if !args.stdout && path.exists() && !args.force {
        return Err(HeirVaultError::PayloadAlreadyExists(path));
    }

    // 1. Gather the secret and a new recovery password.
    let secret = match args.secret {
        Some(s) => zeroize::Zeroizing::new(s.to_string()),
        None => prompt_secret()?,
    };
    let password = prompt_new_password(settings.min_password_len)?;

    // 2. Seal. Nothing is written unless this fully succeeds.
    let payload = seal_secret(secret.as_bytes(), &password)?;

    // 3. Wrap with registration metadata if requested.
    let json = match (args.beneficiary, args.owner_contact) {
        (Some(beneficiary), Some(owner)) => SecretRegistration {
            payload,
            beneficiary_contact: beneficiary.to_string(),
            titular_alert_contact: owner.to_string(),
            grace_period_seconds: args.grace_period,
        }
        .to_json()?,
        _ => payload.to_json()?,
    };

    if args.stdout {
        println!("{json}");
        audit(cli, "seal", Some(args.name), Some("printed to stdout"));
        return Ok(());
    }

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        output::info(&format!("Created payload directory: {}", dir.display()));
    }
    write_private(&path, &json)?;

    audit(cli, "seal", Some(args.name), Some("payload written"));
    output::success(&format!("Sealed '{}' at {}", args.name, path.display()));
    output::tip("Submit this file to the backend, then give your beneficiary the recovery instructions.");
    output::tip("Run `heirvault instructions <SECRET_ID>` once the backend assigns an id.");

    Ok(())
}

/// Write `contents` to `path`, owner-only on unix.
fn write_private(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
