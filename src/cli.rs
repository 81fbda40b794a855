//! CLI domain: parse, route, help, and output only.
//! No orchestration of its own; the route table dispatches to the orchestrator.

mod help;
mod output;
mod parse;
mod route;

pub use help::command_name;
pub use output::{format_report, map_error};
pub use parse::{Cli, Commands, TargetArgs};
pub use route::RunContext;
