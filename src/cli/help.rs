//! CLI command-name contract for logging and routing.

use crate::cli::parse::Commands;
use crate::operation::Operation;

/// Command name string for log records (e.g. "install", "path").
pub fn command_name(command: &Commands) -> &'static str {
    match operation_for(command) {
        Some(op) => op.as_str(),
        None => match command {
            Commands::Path(_) => "path",
            _ => "clone",
        },
    }
}

/// Operation dispatched through the orchestrator for `command`, if any.
/// `path` resolves locally and `clone` runs the clone workflow instead.
pub fn operation_for(command: &Commands) -> Option<Operation> {
    match command {
        Commands::Install(_) => Some(Operation::Install),
        Commands::Update(_) => Some(Operation::Update),
        Commands::Status(_) => Some(Operation::Status),
        Commands::Bump(_) => Some(Operation::Bump),
        Commands::Publish(_) => Some(Operation::Publish),
        Commands::Deploy(_) => Some(Operation::Deploy),
        Commands::Help(_) => Some(Operation::Help),
        Commands::Fix(_) => Some(Operation::Fix),
        Commands::Edit(_) => Some(Operation::Edit),
        Commands::Path(_) | Commands::Clone { .. } => None,
    }
}
