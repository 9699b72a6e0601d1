//! Infrastructure implementations.
//!
//! Contains the world-state port and its adapters, plus configuration.

pub mod config;
pub mod memory_state;
pub mod ports;
pub mod sqlite_state;
