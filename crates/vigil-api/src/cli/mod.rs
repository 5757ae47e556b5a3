//! CLI command definitions and dispatch for the `vgl` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod services;
pub mod workflow;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Orchestrate medical-telemetry workflows across the hub's services.
#[derive(Parser)]
#[command(name = "vgl", version, about, long_about = None)]
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

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a predefined workflow, or one loaded from a JSON file.
    Run {
        /// Predefined workflow id (see `vgl workflows`).
        workflow_id: Option<String>,

        /// Path to an inline workflow definition (JSON).
        #[arg(long, conflicts_with = "workflow_id")]
        file: Option<std::path::PathBuf>,

        /// Initial context variables, repeatable (e.g. -c patientId=p-42).
        #[arg(short = 'c', long = "context", value_name = "KEY=VALUE")]
        context: Vec<String>,
    },

    /// List the predefined workflows.
    Workflows,

    /// Probe collaborator services and show their status.
    Services,

    /// Start the REST API server.
    Serve {
        /// Override the configured listen address.
        #[arg(long)]
        addr: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}
