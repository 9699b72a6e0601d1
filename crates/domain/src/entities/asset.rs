//! Asset entity - the single record type kept in world state

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{AssetId, DataHash};

/// An asset record.
///
/// Stored under its id as a JSON object with the keys `ID`, `dataHash` and
/// `metadata`, always in that order. When decoding, a missing `dataHash` or
/// `metadata` reads as empty; `ID` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "ID")]
    id: AssetId,
    #[serde(rename = "dataHash", default)]
    data_hash: DataHash,
    #[serde(default)]
    metadata: String,
}

impl Asset {
    pub fn new(id: AssetId, data_hash: DataHash, metadata: impl Into<String>) -> Self {
        Self {
            id,
            data_hash,
            metadata: metadata.into(),
        }
    }

    // Read accessors

    pub fn id(&self) -> &AssetId {
        &self.id
    }

    pub fn data_hash(&self) -> &DataHash {
        &self.data_hash
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    /// Encode the record to its stored byte form.
    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        serde_json::to_vec(self).map_err(DomainError::serialization)
    }

    /// Decode a record from its stored byte form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Serialization` when the bytes are not a JSON
    /// object, when `ID` is missing or empty, or when a field has the wrong
    /// type.
    pub fn decode(bytes: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(bytes).map_err(DomainError::serialization)
    }
}
