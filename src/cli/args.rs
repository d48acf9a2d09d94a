//! Command line argument parsing for the helpdesk CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// helpdesk - clarification-aware support desk assistant
#[derive(Parser, Debug, Clone)]
#[command(name = "helpdesk")]
#[command(about = "Classify support queries and run clarification-aware chat sessions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HelpdeskArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON); unset keys keep their defaults
    #[arg(short, long, value_name = "CONFIG_FILE", env = "HELPDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HelpdeskArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Decide whether a query needs clarification against given candidates
    Classify(ClassifyArgs),

    /// Interactive support chat over a local knowledge base
    Chat(ChatArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for classifying a single query
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// JSON array of scored candidates, best first
    #[arg(value_name = "CANDIDATES_FILE")]
    pub candidates_file: PathBuf,

    /// The user query
    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Arguments for the chat REPL
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Knowledge base file (JSON array of articles)
    #[arg(value_name = "KB_FILE")]
    pub kb_file: PathBuf,

    /// Conversation id (random if omitted)
    #[arg(long, value_name = "ID")]
    pub conversation: Option<String>,
}

/// Arguments for showing the configuration
#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    /// Validate the configuration and fail on errors
    #[arg(long)]
    pub validate: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
