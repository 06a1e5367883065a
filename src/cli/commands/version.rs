//! `heirvault version`: display version and the fixed crypto parameters.

use console::style;

use crate::crypto::{IV_LEN, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("heirvault {current}");
    println!(
        "{} PBKDF2-HMAC-SHA256 ({PBKDF2_ITERATIONS} rounds, {}-bit keys), AES-256-GCM ({IV_LEN}-byte IV), {SALT_LEN}-byte salts",
        style("scheme:").dim(),
        KEY_LEN * 8
    );
    Ok(())
}
