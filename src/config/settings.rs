use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{HeirVaultError, Result};

/// Project-level configuration, loaded from `.heirvault.toml`.
///
/// Every field has a sensible default so HeirVault works out-of-the-box
/// without any config file at all. Cryptographic parameters are
/// deliberately absent: they are fixed so stored envelopes stay readable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) for sealed payloads
    /// and the audit database.
    #[serde(default = "default_payload_dir")]
    pub payload_dir: String,

    /// Base URL of the web frontend, used for activation links.
    #[serde(default)]
    pub frontend_base_url: Option<String>,

    /// Minimum length enforced when choosing a new recovery password.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Log level when `HEIRVAULT_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_payload_dir() -> String {
    ".heirvault".to_string()
}

fn default_min_password_len() -> usize {
    8
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            payload_dir: default_payload_dir(),
            frontend_base_url: None,
            min_password_len: default_min_password_len(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".heirvault.toml";

    /// Load settings from `<project_dir>/.heirvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            HeirVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.min_password_len == 0 {
            return Err(HeirVaultError::ConfigError(
                "min_password_len must be at least 1".into(),
            ));
        }

        Ok(settings)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
