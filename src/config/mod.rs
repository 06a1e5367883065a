//! Project configuration loaded from `.heirvault.toml`.

pub mod settings;

pub use settings::Settings;
