//! Asset Ledger domain types.
//!
//! Pure types with no I/O: the `Asset` record, its validated identifier and
//! content hash, and the encoding used to persist records in world state.

pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::Asset;
pub use error::DomainError;
pub use value_objects::{AssetId, DataHash};
