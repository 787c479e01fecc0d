//! Command-line interface for localgit.
//!
//! This module provides the CLI structure for the `localgit` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{CallCommand, ConfigCommand, FilterCommand, ToolsCommand, ValidateCommand};

/// localgit - Local git tools for AI agents
///
/// Runs git operations on repositories under configured roots and strips
/// attribution trailers from commit messages.
#[derive(Debug, Parser)]
#[command(name = "localgit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Allow a repository root (repeatable; the first is the default)
    #[arg(short, long = "repository", global = true, value_name = "DIR")]
    pub repositories: Vec<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available tools
    Tools(ToolsCommand),

    /// Run one tool and print its result
    Call(CallCommand),

    /// Serve tool calls as line-delimited JSON on stdin/stdout
    Serve,

    /// Filter a commit message or PR body
    Filter(FilterCommand),

    /// Validate a repository path
    Validate(ValidateCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            repositories: Vec::new(),
            verbose,
            quiet,
            command: Command::Serve,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "localgit");
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_repositories() {
        let args = ["localgit", "-r", "/srv/a", "--repository", "/srv/b", "tools"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(
            cli.repositories,
            vec![PathBuf::from("/srv/a"), PathBuf::from("/srv/b")]
        );
        assert!(matches!(cli.command, Command::Tools(ToolsCommand { json: false })));
    }

    #[test]
    fn test_parse_call() {
        let args = ["localgit", "call", "git_log", "--args", r#"{"max_count": 3}"#];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Call(call) => {
                assert_eq!(call.tool, "git_log");
                assert_eq!(call.args, r#"{"max_count": 3}"#);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_call_default_args() {
        let cli = Cli::try_parse_from(["localgit", "call", "git_status"]).unwrap();
        assert!(matches!(cli.command, Command::Call(CallCommand { ref args, .. }) if args == "{}"));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["localgit", "-v", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_parse_filter_and_validate() {
        let cli = Cli::try_parse_from(["localgit", "filter", "msg.txt"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Filter(FilterCommand { file: Some(_) })
        ));

        let cli = Cli::try_parse_from(["localgit", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Validate(ValidateCommand { path: None })
        ));
    }

    #[test]
    fn test_parse_config_commands() {
        let cli = Cli::try_parse_from(["localgit", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));

        let cli = Cli::try_parse_from(["localgit", "config", "export-translations"]).unwrap();
        match cli.command {
            Command::Config(ConfigCommand::ExportTranslations { output }) => {
                assert_eq!(output, PathBuf::from("localgit-config.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["localgit", "tools", "-c", "/tmp/c.toml", "-q"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(cli.quiet);
    }
}
