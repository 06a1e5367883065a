//! Printable recovery instructions for the beneficiary.
//!
//! The instructions carry the secret id and the activation link; the
//! recovery password is handed over separately and never printed here.

use std::fmt;

/// Plain-text instructions for one sealed secret.
#[derive(Debug, Clone)]
pub struct RecoveryInstructions {
    secret_id: String,
    frontend_base_url: Option<String>,
}

impl RecoveryInstructions {
    pub fn new(secret_id: impl Into<String>, frontend_base_url: Option<&str>) -> Self {
        Self {
            secret_id: secret_id.into(),
            frontend_base_url: frontend_base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    /// `<base>/activation?secretId=<id>`, if a frontend URL is configured.
    /// The id is percent-encoded.
    pub fn activation_url(&self) -> Option<String> {
        self.frontend_base_url.as_ref().map(|base| {
            format!(
                "{base}/activation?secretId={}",
                urlencoding::encode(&self.secret_id)
            )
        })
    }
}

impl fmt::Display for RecoveryInstructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RECOVERY INSTRUCTIONS")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Keep this sheet somewhere safe and share it with your beneficiary"
        )?;
        writeln!(
            f,
            "through a channel you trust. Do not write the recovery password on it."
        )?;
        writeln!(f)?;
        writeln!(f, "Secret code: {}", self.secret_id)?;
        match self.activation_url() {
            Some(url) => writeln!(f, "Activation link: {url}")?,
            None => writeln!(
                f,
                "Activation: run `heirvault activate {}` once the salt is issued",
                self.secret_id
            )?,
        }
        writeln!(f)?;
        writeln!(
            f,
            "To start recovery, the beneficiary opens the activation link and enters"
        )?;
        write!(f, "the recovery password you gave them.")
    }
}
