//! CLI parse: clap types for `sm`. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// sm - package manager orchestration
#[derive(Parser)]
#[command(name = "sm")]
#[command(about = "Install, update, clone and publish packages through pluggable backends")]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Program root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Selects the package an operation runs against.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Package directory inside the program (defaults to the program root)
    #[arg(long)]
    pub package: Option<PathBuf>,

    /// Backend package manager type (e.g. git, npm)
    #[arg(long)]
    pub pm: Option<String>,

    /// Extra command option as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub extra: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install dependencies
    Install(TargetArgs),
    /// Update dependencies
    Update(TargetArgs),
    /// Show program and package status
    Status(TargetArgs),
    /// Bump the package version
    Bump(TargetArgs),
    /// Publish the package
    Publish(TargetArgs),
    /// Deploy the program
    Deploy(TargetArgs),
    /// List operations and their availability
    Help(TargetArgs),
    /// Repair an installation
    Fix(TargetArgs),
    /// Switch a dependency into edit mode
    Edit(TargetArgs),
    /// Print the resolved package path
    Path(TargetArgs),
    /// Clone a package into a new directory
    Clone {
        /// Directory to clone into (must not exist unless --delete)
        target: PathBuf,
        /// Create missing parent directories
        #[arg(short = 'c', long)]
        create: bool,
        /// Delete an existing target first
        #[arg(short = 'd', long)]
        delete: bool,
        /// Backend package manager type (e.g. git, npm)
        #[arg(long)]
        pm: Option<String>,
        /// Extra command option as key=value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        extra: Vec<(String, String)>,
    },
}
