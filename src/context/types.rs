//! Context record and derivation rules.

use crate::entity::{Package, Program};
use crate::error::PmError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-orchestrator context.
///
/// `home_base_path` is fixed at creation and shared by every context derived
/// from this one. `meta_base_path` is first-writer-wins across the lineage.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    time: DateTime<Utc>,
    home_base_path: PathBuf,
    program: Option<Arc<Program>>,
    package: Option<Arc<Package>>,
    meta_base_path: Option<PathBuf>,
}

impl Context {
    /// Create an empty context rooted at `home_base_path`.
    ///
    /// Performs no filesystem access; the path only has to be absolute.
    pub fn new(home_base_path: impl Into<PathBuf>) -> Result<Self, PmError> {
        let home_base_path = home_base_path.into();
        if home_base_path.as_os_str().is_empty() {
            return Err(PmError::Precondition(
                "home base path must be set".to_string(),
            ));
        }
        if !home_base_path.is_absolute() {
            return Err(PmError::Precondition(format!(
                "home base path '{}' must be absolute",
                home_base_path.display()
            )));
        }
        Ok(Self {
            time: Utc::now(),
            home_base_path,
            program: None,
            package: None,
            meta_base_path: None,
        })
    }

    /// Seed a child context: identity fields and any resolved program or meta
    /// path are inherited, the package slot starts empty.
    pub fn derive_child(&self) -> Self {
        Self {
            time: self.time,
            home_base_path: self.home_base_path.clone(),
            program: self.program.clone(),
            package: None,
            meta_base_path: self.meta_base_path.clone(),
        }
    }

    /// Attach a loaded program. The meta path becomes `<program root>/<meta_dir_name>`
    /// unless the lineage already has one.
    pub fn attach_program(&mut self, program: Program, meta_dir_name: &str) {
        if self.meta_base_path.is_none() {
            self.meta_base_path = Some(program.root().join(meta_dir_name));
        }
        self.program = Some(Arc::new(program));
    }

    /// Attach a loaded package. The meta path becomes `<package path>/<meta_dir_name>`
    /// unless the lineage already has one.
    pub fn attach_package(&mut self, package: Package, meta_dir_name: &str) {
        if self.meta_base_path.is_none() {
            self.meta_base_path = Some(package.path.join(meta_dir_name));
        }
        self.package = Some(Arc::new(package));
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn home_base_path(&self) -> &Path {
        &self.home_base_path
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_deref()
    }

    pub fn package(&self) -> Option<&Package> {
        self.package.as_deref()
    }

    pub fn meta_base_path(&self) -> Option<&Path> {
        self.meta_base_path.as_deref()
    }

    /// Default path resolution: the package path, else the program's root
    /// package path.
    pub fn resolve_path(&self) -> Option<&Path> {
        self.package
            .as_deref()
            .map(|package| package.path.as_path())
            .or_else(|| {
                self.program
                    .as_deref()
                    .map(|program| program.package.path.as_path())
            })
    }
}
