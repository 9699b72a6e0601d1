//! Domain entities - Core business objects with identity

mod asset;

pub use asset::Asset;
