//! Link record store
//!
//! Persistence of channel-to-room link entries: the `LinkStore` contract
//! consumed by the bridge core, plus the SQLite-backed implementation.

pub mod errors;
pub mod link_store;
pub mod migrations;
pub mod sql_store;

pub use errors::StoreError;
pub use link_store::LinkStore;
pub use sql_store::LinkSqlStore;
