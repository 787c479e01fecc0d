//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// List the tool catalogue.
#[derive(Debug, Args)]
pub struct ToolsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Run a single tool.
#[derive(Debug, Args)]
pub struct CallCommand {
    /// Tool name, e.g. `git_status`
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(short, long, value_name = "JSON", default_value = "{}")]
    pub args: String,
}

/// Filter a commit message or PR body.
#[derive(Debug, Args)]
pub struct FilterCommand {
    /// File to read (defaults to stdin)
    pub file: Option<PathBuf>,
}

/// Check a repository path against the allowed roots.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Repository path (defaults to the first allowed repository)
    pub path: Option<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Write tool descriptions and titles to a JSON file for translation
    ExportTranslations {
        /// Output file
        #[arg(short, long, default_value = "localgit-config.json")]
        output: PathBuf,
    },
}
