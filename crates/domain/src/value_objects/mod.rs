//! Value objects - Immutable objects defined by their attributes

mod asset_id;
mod data_hash;

pub use asset_id::AssetId;
pub use data_hash::DataHash;
