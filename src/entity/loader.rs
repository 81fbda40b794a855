use super::descriptor::{PackageDescriptor, ProgramDescriptor, PACKAGE_DESCRIPTOR, PROGRAM_DESCRIPTOR};
use super::{Package, Program};
use crate::error::PmError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Port for initializing entities from a filesystem path.
#[async_trait]
pub trait EntityLoader: Send + Sync {
    /// Load the program rooted at `path`.
    async fn load_program(&self, path: &Path) -> Result<Program, PmError>;

    /// Load the package rooted at `path`.
    async fn load_package(&self, path: &Path) -> Result<Package, PmError>;
}

/// Loader backed by `program.json` / `package.json` descriptors.
///
/// Descriptors are optional; the root must be an existing directory.
#[derive(Debug, Default, Clone)]
pub struct DescriptorLoader;

impl DescriptorLoader {
    pub fn new() -> Self {
        Self
    }

    async fn resolve_root(operation: &str, path: &Path) -> Result<PathBuf, PmError> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            PmError::delegation(operation, format!("cannot stat '{}': {}", path.display(), e))
        })?;
        if !metadata.is_dir() {
            return Err(PmError::delegation(
                operation,
                format!("'{}' is not a directory", path.display()),
            ));
        }
        let canonical = tokio::fs::canonicalize(path)
            .await
            .map_err(|e| PmError::io(path, e))?;
        Ok(dunce::simplified(&canonical).to_path_buf())
    }

    async fn read_descriptor<T: DeserializeOwned>(
        operation: &str,
        path: &Path,
    ) -> Result<Option<T>, PmError> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PmError::io(path, e)),
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            PmError::delegation(
                operation,
                format!("invalid descriptor '{}': {}", path.display(), e),
            )
        })
    }
}

#[async_trait]
impl EntityLoader for DescriptorLoader {
    async fn load_program(&self, path: &Path) -> Result<Program, PmError> {
        let root = Self::resolve_root("program init", path).await?;
        let descriptor_path = root.join(PROGRAM_DESCRIPTOR);
        let descriptor: Option<ProgramDescriptor> =
            Self::read_descriptor("program init", &descriptor_path).await?;
        let package = self.load_package(&root).await?;
        debug!(path = %root.display(), has_descriptor = descriptor.is_some(), "Program loaded");
        Ok(Program {
            path: descriptor_path,
            package,
            descriptor,
        })
    }

    async fn load_package(&self, path: &Path) -> Result<Package, PmError> {
        let root = Self::resolve_root("package init", path).await?;
        let descriptor: Option<PackageDescriptor> =
            Self::read_descriptor("package init", &root.join(PACKAGE_DESCRIPTOR)).await?;
        debug!(path = %root.display(), has_descriptor = descriptor.is_some(), "Package loaded");
        Ok(Package {
            path: root,
            descriptor,
        })
    }
}
