//! CLI command definitions for the `supportbot` binary.

pub mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use supportbot_infra::config::DEFAULT_CONFIG_FILE;

/// Customer support chatbot: REST API server and terminal chat.
#[derive(Parser)]
#[command(name = "supportbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, env = "SUPPORTBOT_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(short, long, env = "SUPPORTBOT_PORT")]
        port: Option<u16>,

        /// Host to bind to (overrides the config file).
        #[arg(long, env = "SUPPORTBOT_HOST")]
        host: Option<String>,
    },

    /// Chat with the support bot in the terminal.
    Chat {
        /// Model to use instead of the configured default.
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
