//! World-state port: the key-value handle every registry operation runs against.

use async_trait::async_trait;

use super::error::WorldStateError;

/// Read/write handle into a key-value world state.
///
/// `get` returns `Ok(None)` when nothing is stored under `key`; errors are
/// reserved for backend malfunction. Callers treat an empty stored value the
/// same as an absent one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorldState: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, WorldStateError>;

    /// Create or overwrite the value stored under `key`.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), WorldStateError>;

    /// Write `value` only if nothing (or an empty value) is stored under `key`.
    ///
    /// Returns `true` if the write happened. The default is `get` followed by
    /// `put` and is NOT atomic; adapters that can do a conditional write
    /// override it.
    async fn put_if_absent(&self, key: &str, value: Vec<u8>) -> Result<bool, WorldStateError> {
        match self.get(key).await? {
            Some(existing) if !existing.is_empty() => Ok(false),
            _ => {
                self.put(key, value).await?;
                Ok(true)
            }
        }
    }
}
