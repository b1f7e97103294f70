//! CLI command definitions and dispatch for the `absher` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod service;
pub mod user;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Absher service assistant: catalog, chat, and the demo portal API.
#[derive(Parser)]
#[command(name = "absher", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "ABSHER_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to the configured port).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,
    },

    /// List the service catalog.
    Services,

    /// Show one service in full.
    Service {
        /// Service tag (iqama, national_id, vehicle).
        tag: String,
    },

    /// List synthetic users for a service.
    Users {
        /// Service tag (iqama, national_id, vehicle).
        tag: String,

        /// Maximum rows to show.
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Classify a query and show per-service keyword scores.
    Classify {
        /// Free-text query.
        query: String,
    },

    /// Ask the assistant one question.
    Ask {
        /// Free-text query.
        query: String,

        /// Send the question to the hosted model instead of the keyword assistant.
        #[arg(long)]
        llm: bool,
    },

    /// Traditional vs assisted workflow comparison.
    Compare,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
