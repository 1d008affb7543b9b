//! Shared utilities for clear-navigator integration tests
//!
//! Tests run the real binary against a fake `cleartool` script inside a temporary
//! directory, so no ClearCase installation is needed.

pub mod assertions;
pub mod fixtures;
