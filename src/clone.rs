//! Clone workflow: prepare a target directory, build a program + package
//! orchestrator pair for it, and hand off to the registered clone command.
//!
//! Steps run strictly in order and the first failure stops the workflow.
//! Nothing is rolled back; the only destructive step is the `delete`-gated
//! removal of an existing target, which happens before anything else is
//! created there. Callers must not run two clones into the same path at once.

use crate::error::{PmError, Remediation};
use crate::operation::{OperationOptions, Report};
use crate::pm::Manager;
use std::path::Path;
use tracing::{debug, error, info};

/// Clone into `target` using the backend named by `options.pm`.
///
/// Precondition failures (missing parent without `create`, existing target
/// without `delete`) leave the filesystem untouched. Failures after the
/// scaffold directory exists carry [`Remediation::CloneFailure`].
pub async fn clone(
    manager: &Manager,
    target: &Path,
    options: &OperationOptions,
) -> Result<Report, PmError> {
    prepare_target(target, options).await?;
    delegate(manager, target, options)
        .await
        .map_err(|e| e.with_remediation(Remediation::CloneFailure))
}

/// Steps 1-3: parent directory, existing target, empty scaffold directory.
async fn prepare_target(target: &Path, options: &OperationOptions) -> Result<(), PmError> {
    if !target.is_absolute() {
        return Err(PmError::Precondition(format!(
            "Clone target '{}' must be an absolute path!",
            target.display()
        )));
    }
    let parent = target.parent().ok_or_else(|| {
        PmError::Precondition(format!(
            "Cannot clone to '{}' as it has no parent path!",
            target.display()
        ))
    })?;

    if !exists(parent).await? {
        if options.create {
            info!("Creating path '{}'.", parent.display());
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PmError::io(parent, e))?;
        } else {
            let message = format!(
                "Cannot clone to '{}' as parent path '{}' does not exist! Use -c to create parent path.",
                target.display(),
                parent.display()
            );
            error!("{}", message);
            return Err(PmError::Precondition(message));
        }
    }

    if occupied(target).await? {
        if options.delete {
            info!("Deleting path '{}'.", target.display());
            remove_tree(target).await?;
        } else {
            let message = format!(
                "Target path '{}' exists! Use -d to delete what is already there.",
                target.display()
            );
            error!("{}", message);
            return Err(PmError::Precondition(message));
        }
    }

    // Entity loaders need a real directory to inspect.
    tokio::fs::create_dir(target)
        .await
        .map_err(|e| PmError::io(target, e))
}

/// Steps 4-6: orchestrators for the scaffold, scaffold removal, clone command.
async fn delegate(
    manager: &Manager,
    target: &Path,
    options: &OperationOptions,
) -> Result<Report, PmError> {
    let program_pm = manager.for_program_path(target).await?;
    let package_pm = manager.for_package_path(target, Some(&program_pm)).await?;

    tokio::fs::remove_dir(target)
        .await
        .map_err(|e| PmError::io(target, e))?;
    debug!(target = %target.display(), pm = ?options.pm, "Scaffold removed; delegating clone");

    package_pm.clone(options).await
}

async fn exists(path: &Path) -> Result<bool, PmError> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| PmError::io(path, e))
}

/// Whether anything sits at `path`, a dangling symlink included.
async fn occupied(path: &Path) -> Result<bool, PmError> {
    match tokio::fs::symlink_metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PmError::io(path, e)),
    }
}

async fn remove_tree(path: &Path) -> Result<(), PmError> {
    let metadata = tokio::fs::symlink_metadata(path)
        .await
        .map_err(|e| PmError::io(path, e))?;
    let result = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };
    result.map_err(|e| PmError::io(path, e))
}
