//! Integration tests for the Sourcemint orchestration core

mod cli_route;
mod context_derivation;
mod operation_dispatch;
mod path_resolution;

pub use test_utils::*;
