//! Roomlink core: provisioning layer for a chat bridge.
//!
//! Links channels on a remote Discord-style network to rooms on a local
//! federated room system. The `core_bridge` module owns the link lifecycle
//! (bridge, capacity check, unbridge); `core_store` owns persistence of the
//! channel-to-room mapping.

pub mod config;
pub mod core_bridge;
pub mod core_store;
pub mod logging;
pub mod test_utils;

pub use config::BridgeConfig;
pub use core_bridge::{Provisioner, RemoteChannel};
pub use logging::{init_logging, LogLevel};
