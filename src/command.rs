//! Command modules: one pluggable implementation per top-level operation.
//!
//! The orchestrator never knows how an operation does its work; it looks the
//! command up in a [`CommandRegistry`] and hands it `(orchestrator, options)`.

mod builtin;
mod registry;

pub use builtin::{HelpCommand, StatusCommand};
pub use registry::CommandRegistry;

use crate::error::PmError;
use crate::operation::{OperationOptions, Report};
use crate::pm::Pm;
use async_trait::async_trait;

/// Entry point of a command module.
#[async_trait]
pub trait Command: Send + Sync {
    async fn run(&self, pm: &Pm, options: &OperationOptions) -> Result<Report, PmError>;
}
