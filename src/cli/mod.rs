//! Command-line interface.

pub mod completions;
pub mod credentials;
pub mod delete;
pub mod output;
pub mod pull;
pub mod push;
pub mod resolve;
pub mod scopes;

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};

/// labvars - Sync GitLab CI/CD variables with a local JSON file.
#[derive(Parser)]
#[command(
    name = "labvars",
    about = "Sync GitLab CI/CD variables with a local JSON file",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub globals: Globals,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct Globals {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Credentials file (default: <config dir>/labvars/config.toml)
    #[arg(long, global = true, env = "LABVARS_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository folder (default: current directory)
    #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Git remote URL to use instead of the folder's origin
    #[arg(long, global = true, env = "LABVARS_REMOTE", value_name = "URL")]
    pub remote: Option<String>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Export all project variables to a JSON file
    Pull {
        /// Destination file (default: the domain's default path)
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Create or update project variables from a JSON file
    Push {
        /// Source file (default: the domain's default path)
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Delete variables by environment scope
    Delete {
        /// Scope to delete; matches every scope containing it (repeatable)
        #[arg(
            short,
            long = "scope",
            value_name = "SCOPE",
            value_parser = NonEmptyStringValueParser::new()
        )]
        scopes: Vec<String>,

        /// Write all variables to FILE before deleting
        #[arg(long, value_name = "FILE", conflicts_with = "backup")]
        snapshot: Option<PathBuf>,

        /// Write all variables to a timestamped file before deleting
        #[arg(long)]
        backup: bool,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List environment scopes in use
    Scopes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage per-domain access tokens
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Credentials subcommands.
#[derive(Subcommand)]
pub enum CredentialsAction {
    /// Add or replace the token for a domain
    Add {
        /// GitLab host (e.g., gitlab.example.com)
        domain: String,
        /// Access token with api scope
        token: String,
        /// Default snapshot file or directory
        #[arg(long, value_name = "PATH")]
        default_path: Option<PathBuf>,
    },

    /// List configured domains
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the token for a domain
    Rm {
        /// GitLab host
        domain: String,
    },
}

/// Execute a command.
pub fn execute(command: Command, globals: &Globals) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Pull { file } => pull::execute(file, globals),
        Push { file } => push::execute(file, globals),
        Delete {
            scopes,
            snapshot,
            backup,
            dry_run,
            yes,
        } => delete::execute(
            delete::Options {
                scopes,
                snapshot,
                backup,
                dry_run,
                yes,
            },
            globals,
        ),
        Scopes { json } => scopes::execute(json, globals),
        Credentials { action } => match action {
            CredentialsAction::Add {
                domain,
                token,
                default_path,
            } => credentials::add(&domain, &token, default_path, globals),
            CredentialsAction::List { json } => credentials::list(json, globals),
            CredentialsAction::Rm { domain } => credentials::rm(&domain, globals),
        },
        Completions { shell } => completions::execute(shell),
    }
}
