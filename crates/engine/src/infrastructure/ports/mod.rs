//! Port traits for infrastructure boundaries.
//!
//! The world-state store is the only abstraction in the engine. Everything
//! else is concrete types. Adapters exist for:
//! - In-memory world state (tests, development)
//! - SQLite world state (durable single node)

mod error;
mod world_state;

// =============================================================================
// World State Port
// =============================================================================
pub use world_state::WorldState;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use world_state::MockWorldState;

// =============================================================================
// Error Types
// =============================================================================
pub use error::WorldStateError;
