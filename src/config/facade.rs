//! Config loading entry points.

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::PmConfig;
use crate::error::PmError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads [`PmConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global file, then workspace files, then `SOURCEMINT_*`
    /// environment variables.
    pub fn load(workspace_root: &Path) -> Result<PmConfig, PmError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(merge_policy::environment());

        let config: PmConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Self::validated(config)
    }

    /// Defaults, then exactly `path` (which must exist), then environment.
    pub fn load_from_file(path: &Path) -> Result<PmConfig, PmError> {
        let config: PmConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    fn validated(config: PmConfig) -> Result<PmConfig, PmError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            PmError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
