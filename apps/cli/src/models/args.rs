//! # CLI Argument Definitions
//!
//! Subcommands, arguments and flags of the `vconf` command line, declared with `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default destination of `vconf dump`.
pub const DEFAULT_DUMP_FILE: &str = "configuration_dump.json";

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "vconf")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Audited, versioned configuration")]
pub struct Cli {
    /// Settings file (defaults to `vconf.*` in the working directory when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Import configuration rows from a JSON file
    Populate {
        /// JSON document to import
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Actor recorded as the author of every created row
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Export the current configuration as importable JSON
    Dump {
        #[arg(short, long, default_value = DEFAULT_DUMP_FILE)]
        file: PathBuf,
        /// Restrict the export to these schemas (all when omitted)
        #[arg(short, long = "schema")]
        schemas: Vec<String>,
    },
    /// Print the current snapshot of a configuration
    Show {
        schema: String,
        /// Key field values, in key order
        keys: Vec<String>,
    },
    /// Print every version of a configuration, newest first
    History { schema: String },
    /// Run the HTTP server
    Serve {},
}
