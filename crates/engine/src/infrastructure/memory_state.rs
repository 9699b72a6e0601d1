//! In-memory world state for development and testing.
//!
//! Nothing is persisted; dropping the value drops the world state.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::infrastructure::ports::{WorldState, WorldStateError};

/// In-memory implementation of [`WorldState`].
///
/// Uses DashMap for thread-safe concurrent access. `put_if_absent` goes
/// through the entry API, so concurrent creates for one key cannot both win.
#[derive(Debug, Default)]
pub struct InMemoryWorldState {
    entries: DashMap<String, Vec<u8>>,
}

impl InMemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, empty values included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl WorldState for InMemoryWorldState {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, WorldStateError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), WorldStateError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: Vec<u8>) -> Result<bool, WorldStateError> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut entry) if entry.get().is_empty() => {
                entry.insert(value);
                Ok(true)
            }
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(true)
            }
        }
    }
}
