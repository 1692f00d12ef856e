//! tiny Language CLI - REPL and one-shot type checking
//!
//! Reads expressions one line at a time, reports the inferred type of each
//! free variable and evaluates closed expressions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod config;
mod format;
mod utils;

use commands::*;
use config::CliConfig;
use format::TreeFormat;
use utils::print_error;

/// tiny Language CLI
#[derive(Parser)]
#[command(name = "tiny")]
#[command(about = "Type inference REPL for the tiny expression language")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive REPL (default)
    Repl {
        /// Read lines from stdin without a line editor or prompt
        #[arg(long)]
        plain: bool,
    },

    /// Type check an expression and report its free variables
    Check {
        /// Expression source
        #[arg(allow_hyphen_values = true)]
        expr: String,
        /// Show detailed type information
        #[arg(long)]
        detailed: bool,
    },

    /// Type check and evaluate an expression
    Eval {
        /// Expression source
        #[arg(allow_hyphen_values = true)]
        expr: String,
    },

    /// Display the syntax tree of an expression
    Parse {
        /// Expression source
        #[arg(allow_hyphen_values = true)]
        expr: String,
        /// Display format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: TreeFormat,
    },

    /// Show the effective configuration
    Config {
        /// Write it to the config file if none exists yet
        #[arg(long)]
        init: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        debug!("Command failed: {:#}", e);
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    if !config.color {
        colored::control::set_override(false);
    }

    let command = cli.command.unwrap_or(Commands::Repl { plain: false });
    match command {
        Commands::Repl { plain } => repl_command(&config, plain),
        Commands::Check { expr, detailed } => check_command(&expr, detailed),
        Commands::Eval { expr } => eval_command(&expr),
        Commands::Parse { expr, format } => parse_command(&expr, format),
        Commands::Config { init } => config_command(&config, cli.config.as_deref(), init),
    }?;

    debug!("Command completed successfully");
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
