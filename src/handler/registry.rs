use super::{BackendHandler, Capability};
use crate::error::PmError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of looking up a capability on a resolved handler.
pub enum CapabilityLookup {
    Supported(Arc<dyn BackendHandler>),
    Unsupported,
}

/// Backend type → handler lookup, populated at startup.
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn BackendHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler under its own `pm_type`, replacing any previous one
    pub fn register(&self, handler: Arc<dyn BackendHandler>) {
        let pm_type = handler.pm_type().to_string();
        self.handlers.write().insert(pm_type, handler);
    }

    /// Resolve the handler for `pm_type`. A missing handler is fatal: the caller
    /// asked for that backend explicitly.
    pub fn resolve(&self, pm_type: &str) -> Result<Arc<dyn BackendHandler>, PmError> {
        self.handlers
            .read()
            .get(pm_type)
            .cloned()
            .ok_or_else(|| PmError::HandlerResolution {
                pm_type: pm_type.to_string(),
            })
    }

    /// Resolve the handler and check it exposes `capability`.
    pub fn lookup(
        &self,
        pm_type: &str,
        capability: Capability,
    ) -> Result<CapabilityLookup, PmError> {
        let handler = self.resolve(pm_type)?;
        if handler.supports(capability) {
            Ok(CapabilityLookup::Supported(handler))
        } else {
            Ok(CapabilityLookup::Unsupported)
        }
    }

    /// Registered backend types, sorted
    pub fn pm_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.handlers.read().keys().cloned().collect();
        types.sort();
        types
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
