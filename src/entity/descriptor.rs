//! JSON descriptors for programs and packages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PROGRAM_DESCRIPTOR: &str = "program.json";
pub const PACKAGE_DESCRIPTOR: &str = "package.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    /// Program-level boot packages, keyed by alias.
    #[serde(default)]
    pub boot: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Backend type that manages this package (e.g. "git", "npm").
    #[serde(default)]
    pub pm: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
