//! `heirvault inspect`: show which payload fields a file carries.
//!
//! Only sizes are printed; nothing is decrypted.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::crypto::{IV_LEN, KEY_LEN, SALT_LEN, TAG_LEN};
use crate::errors::{HeirVaultError, Result};
use crate::sealing::decode_text;

/// Payload fields in wire order.
const FIELDS: [&str; 5] = [
    "encryptedSecret",
    "encryptedDek",
    "saltKek",
    "saltCr",
    "passwordHashCr",
];

/// Execute the `inspect` command.
pub fn execute(file: &str) -> Result<()> {
    let path = Path::new(file);
    if !path.exists() {
        return Err(HeirVaultError::PayloadNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    let rows = field_sizes(&contents)?;

    output::print_field_table(&rows);

    for problem in check_sizes(&rows) {
        output::warning(&problem);
    }

    Ok(())
}

/// Decode each known field and report its byte length.
fn field_sizes(json: &str) -> Result<Vec<(&'static str, Option<usize>)>> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| HeirVaultError::SerializationError(format!("payload: {e}")))?;

    FIELDS
        .iter()
        .map(|&name| -> Result<(&'static str, Option<usize>)> {
            match value.get(name).and_then(|v| v.as_str()) {
                Some(text) => Ok((name, Some(decode_text(text)?.len()))),
                None => Ok((name, None)),
            }
        })
        .collect()
}

/// Flag fields whose sizes cannot come from a well-formed payload.
fn check_sizes(rows: &[(&str, Option<usize>)]) -> Vec<String> {
    let mut problems = Vec::new();

    for (name, len) in rows {
        let Some(len) = *len else { continue };
        let ok = match *name {
            "encryptedSecret" => len > IV_LEN + TAG_LEN,
            "encryptedDek" => len == IV_LEN + KEY_LEN + TAG_LEN,
            "saltKek" | "saltCr" => len == SALT_LEN,
            "passwordHashCr" => len == KEY_LEN,
            _ => true,
        };
        if !ok {
            problems.push(format!("{name} has an unexpected size ({len} bytes)"));
        }
    }

    problems
}
