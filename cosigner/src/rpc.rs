use core::future::Future;

use url::Url;

use alloy_core::primitives::{Address, B256};

use alloy_rpc_types_eth::TransactionReceipt;
use alloy_transport::BoxTransport;
use alloy_rpc_client::ClientBuilder;
use alloy_provider::{Provider, RootProvider};

/// A summary of the receipt for a published transaction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct Receipt {
  pub(crate) transaction_hash: B256,
  pub(crate) block_number: Option<u64>,
  /// If the transaction succeeded.
  pub(crate) status: bool,
}

impl From<TransactionReceipt> for Receipt {
  fn from(receipt: TransactionReceipt) -> Receipt {
    Receipt {
      transaction_hash: receipt.transaction_hash,
      block_number: receipt.block_number,
      status: receipt.status(),
    }
  }
}

/// An error from the RPC.
///
/// These are never retried.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub(crate) enum RpcError {
  #[error("couldn't connect to {url}: {reason}")]
  Connection { url: String, reason: String },
  #[error("couldn't fetch the transaction count: {0}")]
  TransactionCount(String),
  #[error("couldn't publish the transaction: {0}")]
  Publish(String),
  #[error("couldn't fetch the receipt: {0}")]
  Receipt(String),
}

/// The calls made to an Ethereum node.
pub(crate) trait Rpc: Sync {
  /// The amount of transactions sent by an address, which is the nonce for its next transaction.
  fn transaction_count(&self, address: Address)
    -> impl Send + Future<Output = Result<u64, RpcError>>;

  /// Publish a signed, serialized transaction and wait for its receipt.
  fn publish(&self, transaction: Vec<u8>) -> impl Send + Future<Output = Result<Receipt, RpcError>>;
}

/// An RPC backed by an alloy provider.
pub(crate) struct AlloyRpc(RootProvider<BoxTransport>);

impl AlloyRpc {
  pub(crate) fn connect(url: &str) -> Result<AlloyRpc, RpcError> {
    let parsed = Url::parse(url)
      .map_err(|e| RpcError::Connection { url: url.to_string(), reason: e.to_string() })?;
    Ok(AlloyRpc(RootProvider::new(ClientBuilder::default().http(parsed).boxed())))
  }
}

impl Rpc for AlloyRpc {
  fn transaction_count(
    &self,
    address: Address,
  ) -> impl Send + Future<Output = Result<u64, RpcError>> {
    async move {
      self
        .0
        .get_transaction_count(address)
        .await
        .map_err(|e| RpcError::TransactionCount(e.to_string()))
    }
  }

  fn publish(
    &self,
    transaction: Vec<u8>,
  ) -> impl Send + Future<Output = Result<Receipt, RpcError>> {
    async move {
      let pending = self
        .0
        .send_raw_transaction(&transaction)
        .await
        .map_err(|e| RpcError::Publish(e.to_string()))?;
      log::info!("published transaction {}, waiting for its receipt", pending.tx_hash());
      let receipt = pending.get_receipt().await.map_err(|e| RpcError::Receipt(e.to_string()))?;
      Ok(Receipt::from(receipt))
    }
  }
}
