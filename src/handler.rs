//! Backend handlers: package-manager-type specific behavior (git, npm, ...).
//!
//! A handler is selected by the `pm` option at runtime. Capabilities are
//! optional; a handler that does not implement one lets the orchestrator fall
//! back to its default behavior.

mod registry;

pub use registry::{CapabilityLookup, HandlerRegistry};

use crate::error::PmError;
use crate::operation::OperationOptions;
use crate::pm::Pm;
use async_trait::async_trait;
use std::path::PathBuf;

/// Named optional capabilities a handler may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Path,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Path => "path",
        }
    }
}

#[async_trait]
pub trait BackendHandler: Send + Sync {
    /// Identifier this handler is registered under (e.g. "git").
    fn pm_type(&self) -> &str;

    fn supports(&self, _capability: Capability) -> bool {
        false
    }

    /// Backend-specific path resolution. Only called when
    /// `supports(Capability::Path)` is true.
    async fn path(&self, _pm: &Pm, _options: &OperationOptions) -> Result<Option<PathBuf>, PmError> {
        Err(PmError::InvalidState(format!(
            "handler '{}' does not implement the '{}' capability",
            self.pm_type(),
            Capability::Path.as_str()
        )))
    }
}
