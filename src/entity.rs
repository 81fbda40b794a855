//! Program and package entities.
//!
//! The orchestrator treats both as opaque, asynchronously-initialized values:
//! it only needs their on-disk paths and hands them to command modules as-is.
//! Loading goes through the [`EntityLoader`] port so callers can substitute
//! their own manifest parsing.

mod descriptor;
mod loader;

pub use descriptor::{PackageDescriptor, ProgramDescriptor, PACKAGE_DESCRIPTOR, PROGRAM_DESCRIPTOR};
pub use loader::{DescriptorLoader, EntityLoader};

use serde::Serialize;
use std::path::{Path, PathBuf};

/// One installable dependency unit on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    /// Package root directory.
    pub path: PathBuf,
    pub descriptor: Option<PackageDescriptor>,
}

impl Package {
    pub fn name(&self) -> Option<&str> {
        self.descriptor.as_ref().and_then(|d| d.name.as_deref())
    }
}

/// Top-level runnable/installable unit on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    /// Path of the program descriptor file (`<root>/program.json`).
    pub path: PathBuf,
    /// The program's own root package.
    pub package: Package,
    pub descriptor: Option<ProgramDescriptor>,
}

impl Program {
    /// Directory the program lives in.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or(&self.package.path)
    }
}
