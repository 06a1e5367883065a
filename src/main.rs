use clap::Parser;
use heirvault::cli::commands::seal::SealArgs;
use heirvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // A broken config file should not hide the real error, so fall back
    // to the default level here and let the command report it.
    let log_level = heirvault::cli::settings()
        .map(|s| s.log_level)
        .unwrap_or_else(|_| "warn".to_string());
    heirvault::logging::init(&log_level);

    let result = match cli.command {
        Commands::Seal {
            ref name,
            ref secret,
            stdout,
            force,
            ref beneficiary,
            ref owner_contact,
            grace_period,
        } => heirvault::cli::commands::seal::execute(
            &cli,
            &SealArgs {
                name,
                secret: secret.as_deref(),
                stdout,
                force,
                beneficiary: beneficiary.as_deref(),
                owner_contact: owner_contact.as_deref(),
                grace_period,
            },
        ),
        Commands::Open { ref file } => heirvault::cli::commands::open::execute(&cli, file),
        Commands::Activate {
            ref secret_id,
            ref salt_cr,
            ref challenge,
        } => heirvault::cli::commands::activate::execute(
            &cli,
            secret_id,
            salt_cr.as_deref(),
            challenge.as_deref(),
        ),
        Commands::Instructions { ref secret_id } => {
            heirvault::cli::commands::instructions::execute(secret_id)
        }
        Commands::Inspect { ref file } => heirvault::cli::commands::inspect::execute(file),
        Commands::Audit { last, ref since } => run_audit(&cli, last, since.as_deref()),
        Commands::Version => heirvault::cli::commands::version::execute(),
        Commands::Completions { shell } => heirvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        heirvault::cli::output::error(&e.to_string());
        if e.is_input_related() {
            heirvault::cli::output::tip("Check the password and payload, then try again.");
        }
        std::process::exit(1);
    }
}

#[cfg(feature = "audit-log")]
fn run_audit(cli: &Cli, last: usize, since: Option<&str>) -> heirvault::errors::Result<()> {
    heirvault::cli::commands::audit_cmd::execute(cli, last, since)
}

#[cfg(not(feature = "audit-log"))]
fn run_audit(_cli: &Cli, _last: usize, _since: Option<&str>) -> heirvault::errors::Result<()> {
    Err(heirvault::errors::HeirVaultError::AuditError(
        "this build was compiled without the audit-log feature".into(),
    ))
}
