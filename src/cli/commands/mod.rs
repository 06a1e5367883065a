//! One module per subcommand.

pub mod activate;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod completions;
pub mod inspect;
pub mod instructions;
pub mod open;
pub mod seal;
pub mod version;
