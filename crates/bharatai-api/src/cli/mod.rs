//! CLI command definitions for the `bharatai` binary.

pub mod providers;
pub mod query;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Resilient multi-provider query router for farmers and health workers.
#[derive(Parser)]
#[command(name = "bharatai", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the router config (defaults to $BHARATAI_CONFIG, then ./bharatai.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log errors (command output is still printed).
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter for the chosen flags. `RUST_LOG` still overrides it.
    pub fn log_filter(&self) -> &'static str {
        let serving = matches!(self.command, Commands::Serve { .. });
        match self.verbose {
            0 if self.quiet => "error",
            0 if serving => "info",
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Bind address (overrides the config file).
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides the config file).
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },

    /// Ask a free-text question through the text chain.
    Ask {
        /// The question.
        prompt: String,
    },

    /// Look up mandi prices for a state.
    Market {
        /// State or region name, e.g. "Andhra Pradesh".
        location: String,
    },

    /// List configured providers in chain order.
    #[command(alias = "ls")]
    Providers,
}
