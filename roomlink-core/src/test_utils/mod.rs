//! Test utilities for Roomlink
//!
//! Fixtures and test doubles shared by unit and integration tests.

pub mod fixtures;
pub mod memory_store;
pub mod notifiers;

pub use fixtures::*;
pub use memory_store::MemoryLinkStore;
pub use notifiers::RecordingNotifier;
