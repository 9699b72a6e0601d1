//! Asset entity operations.

use assetledger_domain::{Asset, AssetId, DataHash};

use crate::infrastructure::ports::WorldState;

use super::error::{AssetError, AssetOperation, StorageAccess};

/// Asset registry.
///
/// Stateless: every operation takes the world-state handle for the current
/// transaction, and all records live behind that handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetRegistry;

impl AssetRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Create a new asset under `id`.
    ///
    /// Fails with `AlreadyExists` if a record is already stored. The write
    /// itself is conditional, so a record that appears between the check and
    /// the write is also reported as `AlreadyExists` rather than overwritten.
    pub async fn create_asset(
        &self,
        tx: &dyn WorldState,
        id: AssetId,
        data_hash: DataHash,
        metadata: impl Into<String>,
    ) -> Result<Asset, AssetError> {
        if self.read(tx, AssetOperation::Create, &id).await?.is_some() {
            return Err(AssetError::AlreadyExists { id });
        }

        let asset = Asset::new(id, data_hash, metadata);
        let bytes = asset.encode().map_err(|e| AssetError::Decode {
            id: asset.id().clone(),
            message: e.to_string(),
        })?;

        let written = tx
            .put_if_absent(asset.id().as_str(), bytes)
            .await
            .map_err(|source| AssetError::Storage {
                operation: AssetOperation::Create,
                access: StorageAccess::Write,
                id: asset.id().clone(),
                source,
            })?;

        if !written {
            return Err(AssetError::AlreadyExists {
                id: asset.id().clone(),
            });
        }

        Ok(asset)
    }

    /// Return the asset stored under `id`.
    pub async fn query_asset(
        &self,
        tx: &dyn WorldState,
        id: &AssetId,
    ) -> Result<Asset, AssetError> {
        let bytes = self
            .read(tx, AssetOperation::Query, id)
            .await?
            .ok_or_else(|| AssetError::NotFound { id: id.clone() })?;

        Asset::decode(&bytes).map_err(|e| AssetError::Decode {
            id: id.clone(),
            message: e.to_string(),
        })
    }

    /// Whether a non-empty record is stored under `id`.
    ///
    /// A read failure is an error, never "does not exist".
    pub async fn asset_exists(
        &self,
        tx: &dyn WorldState,
        id: &AssetId,
    ) -> Result<bool, AssetError> {
        Ok(self.read(tx, AssetOperation::Exists, id).await?.is_some())
    }

    /// Read the raw value for `id`, folding empty values into `None`.
    async fn read(
        &self,
        tx: &dyn WorldState,
        operation: AssetOperation,
        id: &AssetId,
    ) -> Result<Option<Vec<u8>>, AssetError> {
        let value = tx
            .get(id.as_str())
            .await
            .map_err(|source| AssetError::Storage {
                operation,
                access: StorageAccess::Read,
                id: id.clone(),
                source,
            })?;

        Ok(value.filter(|bytes| !bytes.is_empty()))
    }
}
