//! CLI definitions for the `restyle` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Rewrite posts in saved styles: chat bot and rewrite gateway.
#[derive(Parser)]
#[command(name = "restyle", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, env = "RESTYLE_CONFIG", default_value = "restyle.toml")]
    pub config: PathBuf,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP rewrite gateway.
    Gateway {
        /// Address to bind (overrides `gateway_host`).
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides `gateway_port`).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run the chat bot (long polling).
    Bot,
}

impl Cli {
    /// Default log filter for the chosen verbosity; `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,restyle=debug",
            _ => "trace",
        }
    }
}
