//! Contract dispatch errors.

use assetledger_domain::DomainError;
use thiserror::Error;

use super::ContractFunction;
use crate::entities::AssetError;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Invocation has no function name")]
    MissingFunction,

    #[error("Unknown contract function: {0}")]
    UnknownFunction(String),

    #[error("{function} expects {expected} argument(s), got {actual}")]
    Arity {
        function: ContractFunction,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] DomainError),

    #[error("Malformed invocation: {0}")]
    Malformed(String),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

impl ContractError {
    /// True when the caller sent something the contract cannot run, as
    /// opposed to a registry failure.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Self::MissingFunction
                | Self::UnknownFunction(_)
                | Self::Arity { .. }
                | Self::InvalidArgument(_)
                | Self::Malformed(_)
        )
    }
}
