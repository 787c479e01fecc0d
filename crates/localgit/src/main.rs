//! `localgit` - CLI for the local git tools
//!
//! Lists and runs the tools, serves them over stdin/stdout, and exposes the
//! body filter and path validator for scripting.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use localgit::cli::{Cli, Command, ConfigCommand, FilterCommand, ToolsCommand};
use localgit::filter::{builtin_patterns, find_builtin};
use localgit::tools::tool_names;
use localgit::{init_logging, Config, GitTools};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone())?;
    config.add_repositories(cli.repositories.clone())?;

    match cli.command {
        Command::Tools(cmd) => handle_tools(&config, &cmd),
        Command::Call(cmd) => {
            let tools = build_tools(&config);
            let result = tools.call_json(&cmd.tool, &cmd.args);
            if result.is_error {
                eprintln!("{}", result.text);
                return Ok(ExitCode::FAILURE);
            }
            println!("{}", result.text);
            Ok(())
        }
        Command::Serve => handle_serve(&config),
        Command::Filter(cmd) => handle_filter(&config, &cmd),
        Command::Validate(cmd) => {
            let repo = config
                .path_validator()
                .validate(cmd.path.as_deref().unwrap_or_default())?;
            println!("{repo}");
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, cmd, cli.config.as_deref()),
    }?;

    Ok(ExitCode::SUCCESS)
}

fn build_tools(config: &Config) -> GitTools {
    // Rejected patterns are already logged by the filter.
    let (filter, _) = config.body_filter();

    GitTools::new(config.git_cli(), config.path_validator(), Arc::new(filter))
        .with_translations(Arc::new(config.translations()))
        .with_default_log_count(config.git.default_log_count)
}

fn handle_tools(config: &Config, cmd: &ToolsCommand) -> Result<()> {
    let definitions = build_tools(config).definitions();
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    for definition in &definitions {
        println!("{:<24} {}", definition.name, definition.description);
        for param in definition.params {
            let required = if param.required { " (required)" } else { "" };
            println!("    {}{required}: {}", param.name, param.description);
        }
    }
    Ok(())
}

fn handle_serve(config: &Config) -> Result<()> {
    let tools = Arc::new(build_tools(config));
    info!(
        repositories = config.repositories.allowed.len(),
        tools = tool_names().count(),
        "Starting tool server"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        localgit::serve::serve(tools, stdin, tokio::io::stdout()).await
    })?;
    Ok(())
}

fn handle_filter(config: &Config, cmd: &FilterCommand) -> Result<()> {
    let body = match &cmd.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .context("failed to read stdin")?;
            body
        }
    };

    let (filter, _) = config.body_filter();
    println!("{}", filter.filter_body(&body));
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                print_config(config);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.map_or_else(Config::default_config_path, Path::to_path_buf);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(loaded) => {
                    let rejected = loaded.rejected_filter_patterns();
                    for pattern in &rejected {
                        println!("Warning: {pattern}");
                    }
                    println!("Configuration is valid.");
                }
                Err(e) => println!("Configuration error: {e}"),
            }
        }
        ConfigCommand::ExportTranslations { output } => {
            let translations = Arc::new(config.translations());
            let definitions = build_tools(config)
                .with_translations(Arc::clone(&translations))
                .definitions();
            translations.export_json(&output, &config.filter_patterns)?;
            println!(
                "Wrote translations for {} tools to {}",
                definitions.len(),
                output.display()
            );
        }
    }
    Ok(())
}

fn print_config(config: &Config) {
    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Repositories]");
    println!("  Containment:        {}", config.repositories.containment);
    if config.repositories.allowed.is_empty() {
        println!("  Allowed:            (none)");
    }
    for (i, root) in config.repositories.allowed.iter().enumerate() {
        let marker = if i == 0 { " (default)" } else { "" };
        println!("  Allowed:            {}{marker}", root.display());
    }
    println!();
    println!("[Git]");
    println!("  Binary:             {}", config.git.binary.display());
    println!("  Default log count:  {}", config.git.default_log_count);
    println!();
    println!("[Filter]");
    if config.filter_patterns.is_empty() {
        for builtin in builtin_patterns() {
            println!("  Built-in:           {} ({})", builtin.name, builtin.description);
        }
    }
    for pattern in &config.filter_patterns {
        match find_builtin(pattern) {
            Some(builtin) => {
                println!("  Built-in:           {} ({})", builtin.name, builtin.description);
            }
            None => println!("  Pattern:            {pattern}"),
        }
    }
    println!();
    println!("[Translations]");
    println!("  Overrides:          {}", config.translations.len());
}
