//! Confit - namespace-style application configuration from a parameter store.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use confit::cli::output;
use confit::cli::{execute, Cli};
use confit::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("CONFIT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("confit=debug")
        } else {
            EnvFilter::new("confit=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::Unresolved) => {
                Some("pass --path, or set CONFIT_KEY and CONFIT_APP")
            }
            Error::Config(ConfigError::NoBackend) => {
                Some("reinstall with: cargo install confit --features aws")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
