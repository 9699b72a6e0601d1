//! Application state and composition.

use std::sync::Arc;

use crate::contract::AssetContract;
use crate::entities::AssetRegistry;
use crate::infrastructure::config::{WorldStateBackend, WorldStateConfig};
use crate::infrastructure::memory_state::InMemoryWorldState;
use crate::infrastructure::ports::{WorldState, WorldStateError};
use crate::infrastructure::sqlite_state::SqliteWorldState;

/// Main application state.
///
/// Holds the world-state handle and the components that run against it.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub world_state: Arc<dyn WorldState>,
    pub registry: AssetRegistry,
    pub contract: AssetContract,
}

impl App {
    pub fn new(world_state: Arc<dyn WorldState>) -> Self {
        let registry = AssetRegistry::new();
        Self {
            world_state,
            registry,
            contract: AssetContract::new(registry),
        }
    }

    /// Build the world-state adapter selected by configuration.
    pub async fn connect_world_state(
        config: &WorldStateConfig,
    ) -> Result<Arc<dyn WorldState>, WorldStateError> {
        match config.backend {
            WorldStateBackend::Memory => {
                tracing::warn!("Using in-memory world state; records are lost on shutdown");
                Ok(Arc::new(InMemoryWorldState::new()))
            }
            WorldStateBackend::Sqlite => {
                tracing::info!(path = %config.sqlite_path, "Opening SQLite world state");
                Ok(Arc::new(SqliteWorldState::new(&config.sqlite_path).await?))
            }
        }
    }

    /// Borrow the world-state handle for one operation.
    pub fn tx(&self) -> &dyn WorldState {
        self.world_state.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_starts_empty() {
        let config = WorldStateConfig {
            backend: WorldStateBackend::Memory,
            sqlite_path: String::new(),
        };
        let state = App::connect_world_state(&config).await.expect("connect");

        assert_eq!(state.get("anything").await.expect("get"), None);
    }

    #[tokio::test]
    async fn sqlite_backend_opens_configured_file() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let db_path = temp_dir.path().join("world_state.db");
        let config = WorldStateConfig {
            backend: WorldStateBackend::Sqlite,
            sqlite_path: db_path.to_string_lossy().to_string(),
        };

        let app = App::new(App::connect_world_state(&config).await.expect("connect"));
        app.tx().put("k", b"v".to_vec()).await.expect("put");

        assert!(db_path.exists());
    }
}
