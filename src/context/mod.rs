//! Context domain: the record of program/package identity, paths and metadata
//! location carried by one orchestrator lineage.

pub mod types;

pub use types::Context;
