//! Asset registry error types.

use std::fmt;

use assetledger_domain::AssetId;

use crate::infrastructure::ports::WorldStateError;

/// Registry operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOperation {
    Create,
    Query,
    Exists,
}

impl fmt::Display for AssetOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "CreateAsset",
            Self::Query => "QueryAsset",
            Self::Exists => "AssetExists",
        };
        f.write_str(name)
    }
}

/// Direction of a failed world-state access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageAccess {
    Read,
    Write,
}

impl fmt::Display for StorageAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read from"),
            Self::Write => f.write_str("write to"),
        }
    }
}

/// Kind tag for [`AssetError`], for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetErrorKind {
    Storage,
    AlreadyExists,
    NotFound,
    Decode,
}

/// Errors returned by [`super::AssetRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The world-state store failed. Never retried here.
    #[error("{operation} failed to {access} world state for asset {id}: {source}")]
    Storage {
        operation: AssetOperation,
        access: StorageAccess,
        id: AssetId,
        #[source]
        source: WorldStateError,
    },

    #[error("The asset {id} already exists")]
    AlreadyExists { id: AssetId },

    #[error("The asset {id} does not exist")]
    NotFound { id: AssetId },

    /// Stored bytes could not be converted to or from an `Asset`.
    #[error("Asset {id} could not be decoded: {message}")]
    Decode { id: AssetId, message: String },
}

impl AssetError {
    pub fn kind(&self) -> AssetErrorKind {
        match self {
            Self::Storage { .. } => AssetErrorKind::Storage,
            Self::AlreadyExists { .. } => AssetErrorKind::AlreadyExists,
            Self::NotFound { .. } => AssetErrorKind::NotFound,
            Self::Decode { .. } => AssetErrorKind::Decode,
        }
    }
}
