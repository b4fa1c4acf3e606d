//! labvars - Sync GitLab CI/CD variables with a local JSON file.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use labvars::cli::output;
use labvars::cli::{execute, Cli};
use labvars::error::{ConfigError, Error, GitError, SnapshotError, SyncError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("LABVARS_LOG").unwrap_or_else(|_| {
        if cli.globals.verbose {
            EnvFilter::new("labvars=debug")
        } else {
            EnvFilter::new("labvars=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, &cli.globals) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<String> {
    match e {
        Error::Config(ConfigError::CredentialNotFound(domain)) => {
            Some(format!("run: labvars credentials add {} <token>", domain))
        }
        Error::Git(GitError::NotAGitRepository(_)) => {
            Some("run inside a repository, or pass --remote <url>".to_string())
        }
        Error::Snapshot(SnapshotError::NotSelected) => Some(
            "pass --file, or set one with: labvars credentials add <host> <token> --default-path <path>"
                .to_string(),
        ),
        Error::Sync(SyncError::NoScopesSelected) => Some("pass --scope <scope>".to_string()),
        Error::Sync(SyncError::NotConfirmed) => Some("pass --yes to skip confirmation".to_string()),
        _ => None,
    }
}
