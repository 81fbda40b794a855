//! Commands shipped with the crate. Everything else is registered by the host.

use super::Command;
use crate::error::PmError;
use crate::operation::{Operation, OperationOptions, Report};
use crate::pm::Pm;
use async_trait::async_trait;
use serde_json::json;

/// Lists every operation and whether a command is registered for it.
pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    async fn run(&self, pm: &Pm, _options: &OperationOptions) -> Result<Report, PmError> {
        let registered = pm.manager().commands().operations();
        let mut lines = vec!["Operations:".to_string()];
        let mut entries = Vec::new();
        for op in Operation::ALL {
            let available = registered.contains(&op);
            if available {
                lines.push(format!("  {}", op.as_str()));
            } else {
                lines.push(format!("  {:<8} (no command registered)", op.as_str()));
            }
            entries.push(json!({ "operation": op, "available": available }));
        }
        lines.push("  path     resolve the package path (optionally via --pm backend)".to_string());
        lines.push("  clone    clone a package into a new directory".to_string());
        Ok(Report::new(Operation::Help, lines.join("\n")).with_data(json!(entries)))
    }
}

/// Describes the orchestrator's context.
pub struct StatusCommand;

#[async_trait]
impl Command for StatusCommand {
    async fn run(&self, pm: &Pm, _options: &OperationOptions) -> Result<Report, PmError> {
        let ctx = pm.context();
        let mut lines = Vec::new();
        if let Some(program) = ctx.program() {
            lines.push(format!("Program: {}", program.root().display()));
        }
        if let Some(package) = ctx.package() {
            match package.name() {
                Some(name) => lines.push(format!("Package: {} ({})", name, package.path.display())),
                None => lines.push(format!("Package: {}", package.path.display())),
            }
        }
        if let Some(meta) = ctx.meta_base_path() {
            lines.push(format!("Meta: {}", meta.display()));
        }
        lines.push(format!("Home: {}", ctx.home_base_path().display()));

        let data = serde_json::to_value(ctx).map_err(|e| {
            PmError::delegation(Operation::Status.as_str(), format!("cannot encode context: {}", e))
        })?;
        Ok(Report::new(Operation::Status, lines.join("\n")).with_data(data))
    }
}
