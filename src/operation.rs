//! Top-level operations, the options passed to them, and what they report back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Operations dispatched to pluggable command modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Install,
    Update,
    Status,
    Bump,
    Publish,
    Clone,
    Deploy,
    Help,
    Fix,
    Edit,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::Install,
        Operation::Update,
        Operation::Status,
        Operation::Bump,
        Operation::Publish,
        Operation::Clone,
        Operation::Deploy,
        Operation::Help,
        Operation::Fix,
        Operation::Edit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Install => "install",
            Operation::Update => "update",
            Operation::Status => "status",
            Operation::Bump => "bump",
            Operation::Publish => "publish",
            Operation::Clone => "clone",
            Operation::Deploy => "deploy",
            Operation::Help => "help",
            Operation::Fix => "fix",
            Operation::Edit => "edit",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown operation: {}", s))
    }
}

/// Options handed to every operation.
///
/// `create`/`delete` are only read by the clone workflow; `pm` selects a backend
/// handler. Anything else a command understands travels in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationOptions {
    #[serde(default)]
    pub pm: Option<String>,
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub delete: bool,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl OperationOptions {
    pub fn with_pm(pm: impl Into<String>) -> Self {
        Self {
            pm: Some(pm.into()),
            ..Self::default()
        }
    }
}

/// Result of a completed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub operation: Operation,
    pub summary: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Report {
    pub fn new(operation: Operation, summary: impl Into<String>) -> Self {
        Self {
            operation,
            summary: summary.into(),
            data: serde_json::Value::Null,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}
