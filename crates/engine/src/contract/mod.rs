//! Contract adapter.
//!
//! Registers the asset registry's operations under their ledger function
//! names and dispatches string-argument invocations to them. The registry
//! itself knows nothing about this calling convention.

mod error;
mod invocation;

use std::fmt;
use std::str::FromStr;

use assetledger_domain::{AssetId, DataHash};

use crate::entities::{AssetError, AssetRegistry};
use crate::infrastructure::ports::WorldState;

pub use error::ContractError;
pub use invocation::Invocation;

/// Functions exposed to invokers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFunction {
    CreateAsset,
    QueryAsset,
    AssetExists,
}

impl ContractFunction {
    pub const ALL: [Self; 3] = [Self::CreateAsset, Self::QueryAsset, Self::AssetExists];

    pub fn name(self) -> &'static str {
        match self {
            Self::CreateAsset => "CreateAsset",
            Self::QueryAsset => "QueryAsset",
            Self::AssetExists => "AssetExists",
        }
    }

    /// Number of string arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Self::CreateAsset => 3,
            Self::QueryAsset | Self::AssetExists => 1,
        }
    }
}

impl fmt::Display for ContractFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContractFunction {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| ContractError::UnknownFunction(s.to_string()))
    }
}

/// Name-based dispatcher over [`AssetRegistry`].
///
/// Payloads returned by [`AssetContract::invoke`]:
/// - `CreateAsset`: empty
/// - `QueryAsset`: the stored record encoding
/// - `AssetExists`: `true` or `false`
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetContract {
    registry: AssetRegistry,
}

impl AssetContract {
    pub fn new(registry: AssetRegistry) -> Self {
        Self { registry }
    }

    /// Functions registered with this contract.
    pub fn functions(&self) -> &'static [ContractFunction] {
        &ContractFunction::ALL
    }

    pub async fn invoke(
        &self,
        tx: &dyn WorldState,
        invocation: &Invocation,
    ) -> Result<Vec<u8>, ContractError> {
        let name = invocation
            .function()
            .ok_or(ContractError::MissingFunction)?;
        let function: ContractFunction = name.parse()?;

        tracing::debug!(function = %function, "Invoking contract function");

        let result = self.dispatch(tx, function, invocation.arguments()).await;
        match &result {
            Ok(payload) => tracing::debug!(
                function = %function,
                payload_len = payload.len(),
                "Contract function completed"
            ),
            Err(e) => tracing::warn!(function = %function, error = %e, "Contract function failed"),
        }
        result
    }

    async fn dispatch(
        &self,
        tx: &dyn WorldState,
        function: ContractFunction,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        match (function, args) {
            (ContractFunction::CreateAsset, [id, data_hash, metadata]) => {
                let id = AssetId::new(id.as_str())?;
                self.registry
                    .create_asset(tx, id, DataHash::new(data_hash.as_str()), metadata.as_str())
                    .await?;
                Ok(Vec::new())
            }
            (ContractFunction::QueryAsset, [id]) => {
                let id = AssetId::new(id.as_str())?;
                let asset = self.registry.query_asset(tx, &id).await?;
                let payload = asset.encode().map_err(|e| AssetError::Decode {
                    id,
                    message: e.to_string(),
                })?;
                Ok(payload)
            }
            (ContractFunction::AssetExists, [id]) => {
                let id = AssetId::new(id.as_str())?;
                let exists = self.registry.asset_exists(tx, &id).await?;
                Ok(exists.to_string().into_bytes())
            }
            (function, args) => Err(ContractError::Arity {
                function,
                expected: function.arity(),
                actual: args.len(),
            }),
        }
    }
}
