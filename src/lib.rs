//! Sourcemint: package manager orchestration core
//!
//! Resolves the context an operation runs in (program, package, home and
//! metadata paths), dispatches top-level operations to pluggable command
//! modules, and selects backend handlers by package-manager type at runtime.

pub mod cli;
pub mod clone;
pub mod command;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod handler;
pub mod logging;
pub mod operation;
pub mod pm;

pub use context::Context;
pub use error::{ErrorKind, PmError, Remediation};
pub use operation::{Operation, OperationOptions, Report};
pub use pm::{Manager, ManagerBuilder, Pm, PmState};
