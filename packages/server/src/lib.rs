//! Gearbook Server — device sign-out records over a sheet-backed store.

pub mod config;
pub mod network;
pub mod storage;

pub use config::{ServerConfig, StoreBackend};
