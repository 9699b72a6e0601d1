//! Asset Ledger Engine library.
//!
//! ## Structure
//!
//! - `entities/` - Asset registry operations over the world-state port
//! - `contract/` - Name-based dispatch of ledger invocations to the registry
//! - `infrastructure/` - World-state port, adapters, and configuration
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod contract;
pub mod entities;
pub mod infrastructure;

pub use app::App;
