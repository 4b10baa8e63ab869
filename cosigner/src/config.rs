use core::str::FromStr;
use std::path::PathBuf;

use alloy_core::primitives::Address;

use recovery::CandidateRecoveryId;

/// An error with the configuration.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub(crate) enum ConfigError {
  #[error("no RPC URL was specified (set --rpc-url or COSIGNER_RPC_URL)")]
  MissingRpcUrl,
}

/// The configuration shared by all commands.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct Config {
  rpc_url: Option<String>,
  pub(crate) artifacts: PathBuf,
}

impl Config {
  /// Create a configuration, with unspecified values read from the environment.
  pub(crate) fn new(rpc_url: Option<String>, artifacts: Option<PathBuf>) -> Config {
    Config {
      rpc_url: rpc_url.or_else(|| env::var("COSIGNER_RPC_URL")),
      artifacts: artifacts
        .unwrap_or_else(|| PathBuf::from(env::var_or("COSIGNER_ARTIFACTS", "."))),
    }
  }

  pub(crate) fn rpc_url(&self) -> Result<&str, ConfigError> {
    self.rpc_url.as_deref().ok_or(ConfigError::MissingRpcUrl)
  }
}

pub(crate) fn parse_address(value: &str) -> Result<Address, String> {
  Address::from_str(value.trim()).map_err(|e| format!("invalid address {value:?}: {e}"))
}

/// Parse a quantity, either decimal or `0x`-prefixed hex.
pub(crate) fn parse_quantity<T: TryFrom<u128>>(value: &str) -> Result<T, String> {
  let trimmed = value.trim();
  let parsed = match trimmed.strip_prefix("0x") {
    Some(hex) => u128::from_str_radix(hex, 16),
    None => trimmed.parse::<u128>(),
  }
  .map_err(|e| format!("invalid quantity {value:?}: {e}"))?;
  T::try_from(parsed).map_err(|_| format!("quantity {value:?} is out of range"))
}

pub(crate) fn parse_recovery_id(value: &str) -> Result<u64, String> {
  let v = parse_quantity::<u64>(value)?;
  CandidateRecoveryId::new(v).map(CandidateRecoveryId::value).map_err(|e| e.to_string())
}
