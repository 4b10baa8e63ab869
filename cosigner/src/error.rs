use alloy_core::primitives::B256;

use ethereum_primitives::TransactionError;
use recovery::{MalformedInput, RecoveryError};

use crate::{config::ConfigError, artifacts::ArtifactError, rpc::RpcError};

/// An error encountered while running a command.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
  #[error("configuration error: {0}")]
  Config(#[from] ConfigError),
  #[error("artifact error: {0}")]
  Artifact(#[from] ArtifactError),
  #[error("invalid transaction: {0}")]
  Transaction(#[from] TransactionError),
  #[error("couldn't resolve the signature: {0}")]
  Recovery(#[from] RecoveryError),
  #[error("external call failed: {0}")]
  ExternalCallFailure(#[from] RpcError),
  #[error("{0} isn't a valid SEC1-encoded public key")]
  InvalidPublicKey(String),
  #[error("invalid hex for {field}: {reason}")]
  Hex { field: &'static str, reason: hex::FromHexError },
  #[error("no EIP-155 recovery IDs exist for chain {0}")]
  ChainIdOverflow(u64),
  #[error("transaction {0} reverted")]
  Reverted(B256),
  #[error("couldn't serialize the output: {0}")]
  Output(#[from] serde_json::Error),
}

impl From<MalformedInput> for Error {
  fn from(e: MalformedInput) -> Error {
    Error::Recovery(RecoveryError::MalformedInput(e))
  }
}
