//! Command-line interface.

pub mod completions;
pub mod export;
pub mod fetch;
pub mod get;
pub mod import;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::client::{Confit, ConfitOptions};
use crate::error::Result;

/// Confit - namespace-style application configuration from a parameter store.
#[derive(Parser)]
#[command(
    name = "confit",
    about = "Namespace-style application configuration from a parameter store",
    version
)]
pub struct Cli {
    /// Explicit parameter path (overrides --key/--app)
    #[arg(long, global = true)]
    pub path: Option<String>,

    /// Key namespace, e.g. Production (default: CONFIT_KEY, then Development)
    #[arg(long = "key", global = true)]
    pub key_namespace: Option<String>,

    /// Application name (default: CONFIT_APP)
    #[arg(long, global = true)]
    pub app: Option<String>,

    /// AWS region override
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Fetch and print all parameters under the resolved path
    Fetch {
        /// Recurse into nested paths
        #[arg(short, long)]
        recursive: bool,
        /// Keep SecureString values encrypted
        #[arg(long)]
        no_decrypt: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a single parameter value
    Get {
        /// Local parameter name (e.g. DATABASE_URL)
        name: String,
    },

    /// Bulk-write parameters from a JSON descriptor file
    Import {
        /// Path to the descriptor file
        file: PathBuf,
    },

    /// Dump parameters to a JSON descriptor file
    Export {
        /// Path to write
        file: PathBuf,
        /// Recurse into nested paths
        #[arg(short, long)]
        recursive: bool,
        /// Write SecureString values as plaintext
        #[arg(long)]
        decrypt: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Path/namespace selection shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Target {
    pub path: Option<String>,
    pub key_namespace: Option<String>,
    pub app_name: Option<String>,
    pub region: Option<String>,
}

#[cfg(feature = "aws")]
fn client(target: &Target) -> Result<Confit> {
    Confit::from_env(
        ConfitOptions {
            path: target.path.clone(),
            key_namespace: target.key_namespace.clone(),
            app_name: target.app_name.clone(),
            declared_app: None,
        },
        target.region.clone(),
    )
}

#[cfg(not(feature = "aws"))]
fn client(_target: &Target) -> Result<Confit> {
    Err(crate::error::ConfigError::NoBackend.into())
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let target = Target {
        path: cli.path,
        key_namespace: cli.key_namespace,
        app_name: cli.app,
        region: cli.region,
    };

    match cli.command {
        Command::Fetch {
            recursive,
            no_decrypt,
            json,
        } => fetch::execute(&target, recursive, !no_decrypt, json),
        Command::Get { name } => get::execute(&target, &name),
        Command::Import { file } => import::execute(&target, &file),
        Command::Export {
            file,
            recursive,
            decrypt,
        } => export::execute(&target, &file, recursive, decrypt),
        Command::Completions { shell } => completions::execute(shell),
    }
}
