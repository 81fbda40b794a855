use super::{Command, HelpCommand, StatusCommand};
use crate::error::PmError;
use crate::operation::Operation;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Operation → command lookup, populated at startup.
pub struct CommandRegistry {
    commands: RwLock<HashMap<Operation, Arc<dyn Command>>>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            commands: RwLock::new(HashMap::new()),
        }
    }

    /// Registry preloaded with the commands this crate ships (`help`, `status`)
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(Operation::Help, Arc::new(HelpCommand));
        registry.register(Operation::Status, Arc::new(StatusCommand));
        registry
    }

    /// Register a command, replacing any previous one for the same operation
    pub fn register(&self, operation: Operation, command: Arc<dyn Command>) {
        self.commands.write().insert(operation, command);
    }

    pub fn get(&self, operation: Operation) -> Option<Arc<dyn Command>> {
        self.commands.read().get(&operation).cloned()
    }

    pub fn get_or_error(&self, operation: Operation) -> Result<Arc<dyn Command>, PmError> {
        self.get(operation)
            .ok_or(PmError::CommandUnavailable(operation))
    }

    /// Registered operations in declaration order
    pub fn operations(&self) -> Vec<Operation> {
        let commands = self.commands.read();
        Operation::ALL
            .iter()
            .copied()
            .filter(|op| commands.contains_key(op))
            .collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
