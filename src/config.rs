//! Configuration System
//!
//! Layered configuration (defaults, global file, workspace files, environment)
//! for the values the orchestrator must be handed explicitly: where the home
//! base lives, what the metadata directory is called, and how to log.

use crate::error::PmError;
use crate::logging::LoggingConfig;
use crate::pm::DEFAULT_META_DIR;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PmConfig {
    /// Home directory override; `$HOME` when unset
    #[serde(default)]
    pub home: Option<PathBuf>,

    /// Name of the hidden metadata directory, also used under the home directory
    #[serde(default = "default_meta_dir_name")]
    pub meta_dir_name: String,

    /// Backend type used when an operation does not name one
    #[serde(default)]
    pub default_pm: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_meta_dir_name() -> String {
    DEFAULT_META_DIR.to_string()
}

impl Default for PmConfig {
    fn default() -> Self {
        Self {
            home: None,
            meta_dir_name: default_meta_dir_name(),
            default_pm: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Home(String),
    MetaDir(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Home(msg) => write!(f, "home: {}", msg),
            ValidationError::MetaDir(msg) => write!(f, "meta_dir_name: {}", msg),
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl PmConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(home) = &self.home {
            if !home.is_absolute() {
                errors.push(ValidationError::Home(format!(
                    "'{}' must be an absolute path",
                    home.display()
                )));
            }
        }

        if self.meta_dir_name.is_empty() {
            errors.push(ValidationError::MetaDir("cannot be empty".to_string()));
        } else if self.meta_dir_name.contains('/') || self.meta_dir_name.contains('\\') {
            errors.push(ValidationError::MetaDir(format!(
                "'{}' must be a single directory name",
                self.meta_dir_name
            )));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Home directory: the configured override, else `$HOME`.
    pub fn home_dir(&self) -> Result<PathBuf, PmError> {
        if let Some(home) = &self.home {
            return Ok(home.clone());
        }
        match std::env::var_os("HOME") {
            Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
            _ => Err(PmError::Precondition(
                "'HOME' environment variable must be set!".to_string(),
            )),
        }
    }

    /// `<home>/<meta_dir_name>`, the process-wide configuration root handed to
    /// the orchestrator. Touches no files.
    pub fn home_base_path(&self) -> Result<PathBuf, PmError> {
        Ok(self.home_dir()?.join(&self.meta_dir_name))
    }
}
