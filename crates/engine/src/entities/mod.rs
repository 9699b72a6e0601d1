//! Entity modules - Domain capability encapsulation.
//!
//! Each module wraps operations for a domain entity type.
//! They depend on the world-state port and are driven by the contract and
//! HTTP layers.

pub mod assets;
pub mod error;

pub use assets::AssetRegistry;
pub use error::{AssetError, AssetErrorKind, AssetOperation, StorageAccess};
