use core::str::FromStr;

use serde::{Serialize, Deserialize};

use alloy_core::primitives::{Address, U256, PrimitiveSignature, TxKind};
use alloy_consensus::{SignableTransaction, TxEip1559};

use crate::keccak256;

/// An error when constructing or decoding an unsigned transaction.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum TransactionError {
  /// The transaction type wasn't EIP-1559 (type 2).
  #[error("unsupported transaction type {0} (only type 2 is supported)")]
  UnsupportedTransactionType(u8),
  /// The priority fee exceeded the max fee.
  #[error(
    "max priority fee per gas ({max_priority_fee_per_gas}) exceeds max fee per gas \
     ({max_fee_per_gas})"
  )]
  PriorityFeeExceedsMaxFee {
    /// The max fee per gas.
    max_fee_per_gas: u128,
    /// The max priority fee per gas.
    max_priority_fee_per_gas: u128,
  },
  /// A quantity couldn't be parsed.
  #[error("invalid quantity for {field}: {value:?}")]
  InvalidQuantity {
    /// The field the quantity was for.
    field: &'static str,
    /// The value which failed to parse.
    value: String,
  },
  /// A quantity didn't fit within its field.
  #[error("quantity for {0} is out of range")]
  QuantityOverflow(&'static str),
  /// An address couldn't be parsed.
  #[error("invalid address {0:?}")]
  InvalidAddress(String),
  /// An amount of ether couldn't be parsed.
  #[error("invalid ether amount {0:?}")]
  InvalidEtherAmount(String),
}

/// Parse a decimal amount of ether (such as `"0.00000001"`) into wei.
pub fn parse_ether(amount: &str) -> Result<U256, TransactionError> {
  alloy_core::primitives::utils::parse_ether(amount.trim())
    .map_err(|_| TransactionError::InvalidEtherAmount(amount.to_string()))
}

/// The fields of an EIP-1559 transaction transferring value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Eip1559Fields {
  /// The recipient.
  pub to: Address,
  /// The value transferred, in wei.
  pub value: U256,
  /// The max fee per gas.
  pub max_fee_per_gas: u128,
  /// The max priority fee per gas.
  pub max_priority_fee_per_gas: u128,
  /// The nonce of the sender.
  pub nonce: u64,
  /// The gas limit.
  pub gas_limit: u64,
  /// The ID of the chain this transaction is bound to.
  pub chain_id: u64,
}

/// An unsigned EIP-1559 transaction.
///
/// This is immutable once constructed. Its serialization for signing is deterministic, as is its
/// hash.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "TransactionFile", into = "TransactionFile")]
pub struct UnsignedTransaction {
  tx: TxEip1559,
  to: Address,
}

impl UnsignedTransaction {
  /// The EIP-2718 type of transactions represented.
  pub const TYPE: u8 = 2;

  /// Create a new unsigned transaction.
  pub fn new(fields: Eip1559Fields) -> Result<Self, TransactionError> {
    let Eip1559Fields {
      to,
      value,
      max_fee_per_gas,
      max_priority_fee_per_gas,
      nonce,
      gas_limit,
      chain_id,
    } = fields;

    if max_priority_fee_per_gas > max_fee_per_gas {
      Err(TransactionError::PriorityFeeExceedsMaxFee {
        max_fee_per_gas,
        max_priority_fee_per_gas,
      })?;
    }

    let tx = TxEip1559 {
      chain_id,
      nonce,
      gas_limit,
      max_fee_per_gas,
      max_priority_fee_per_gas,
      to: TxKind::Call(to),
      value,
      ..Default::default()
    };
    Ok(Self { tx, to })
  }

  /// The underlying alloy transaction.
  pub fn tx(&self) -> &TxEip1559 {
    &self.tx
  }

  /// The recipient.
  pub fn to(&self) -> Address {
    self.to
  }

  /// The value transferred, in wei.
  pub fn value(&self) -> U256 {
    self.tx.value
  }

  /// The nonce of the sender.
  pub fn nonce(&self) -> u64 {
    self.tx.nonce
  }

  /// The ID of the chain this transaction is bound to.
  pub fn chain_id(&self) -> u64 {
    self.tx.chain_id
  }

  /// The gas limit.
  pub fn gas_limit(&self) -> u64 {
    self.tx.gas_limit
  }

  /// The max fee per gas.
  pub fn max_fee_per_gas(&self) -> u128 {
    self.tx.max_fee_per_gas
  }

  /// The max priority fee per gas.
  pub fn max_priority_fee_per_gas(&self) -> u128 {
    self.tx.max_priority_fee_per_gas
  }

  /// Serialize this transaction for signing.
  ///
  /// This is the type byte followed by the RLP encoding of the transaction's fields.
  pub fn serialize(&self) -> Vec<u8> {
    let mut buf = Vec::with_capacity(self.tx.payload_len_for_signature());
    self.tx.encode_for_signing(&mut buf);
    buf
  }

  /// The hash to sign for this transaction.
  pub fn hash(&self) -> [u8; 32] {
    keccak256(self.serialize())
  }

  /// The EIP-2718 encoding of this transaction, signed with the specified signature.
  ///
  /// This does not check the signature is valid for this transaction.
  pub fn signed_bytes(&self, signature: PrimitiveSignature) -> Vec<u8> {
    let mut bytes = vec![];
    self.tx.clone().into_signed(signature).eip2718_encode(&mut bytes);
    bytes
  }
}

/// A quantity within a transaction file.
///
/// We write quantities as `0x`-prefixed hex strings, yet accept JSON numbers, decimal strings,
/// and ethers' `{ "type": "BigNumber", "hex": ... }` objects.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Quantity {
  Number(u64),
  Text(String),
  BigNumber { hex: String },
}

impl Quantity {
  fn hex(value: U256) -> Self {
    Self::Text(format!("0x{value:x}"))
  }

  fn value(&self, field: &'static str) -> Result<U256, TransactionError> {
    match self {
      Quantity::Number(number) => Ok(U256::from(*number)),
      Quantity::Text(text) | Quantity::BigNumber { hex: text } => U256::from_str(text.trim())
        .map_err(|_| TransactionError::InvalidQuantity { field, value: text.clone() }),
    }
  }

  fn narrow<T: TryFrom<U256>>(&self, field: &'static str) -> Result<T, TransactionError> {
    T::try_from(self.value(field)?).map_err(|_| TransactionError::QuantityOverflow(field))
  }
}

/// The representation of an unsigned transaction within `unsignedTx.json`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionFile {
  to: String,
  value: Quantity,
  #[serde(rename = "type")]
  kind: u8,
  max_fee_per_gas: Quantity,
  max_priority_fee_per_gas: Quantity,
  nonce: Quantity,
  gas_limit: Quantity,
  chain_id: Quantity,
}

impl TryFrom<TransactionFile> for UnsignedTransaction {
  type Error = TransactionError;
  fn try_from(file: TransactionFile) -> Result<Self, TransactionError> {
    if file.kind != Self::TYPE {
      Err(TransactionError::UnsupportedTransactionType(file.kind))?;
    }
    let to =
      Address::from_str(file.to.trim()).map_err(|_| TransactionError::InvalidAddress(file.to))?;

    Self::new(Eip1559Fields {
      to,
      value: file.value.value("value")?,
      max_fee_per_gas: file.max_fee_per_gas.narrow("maxFeePerGas")?,
      max_priority_fee_per_gas: file.max_priority_fee_per_gas.narrow("maxPriorityFeePerGas")?,
      nonce: file.nonce.narrow("nonce")?,
      gas_limit: file.gas_limit.narrow("gasLimit")?,
      chain_id: file.chain_id.narrow("chainId")?,
    })
  }
}

impl From<UnsignedTransaction> for TransactionFile {
  fn from(tx: UnsignedTransaction) -> Self {
    TransactionFile {
      to: tx.to().to_checksum(None),
      value: Quantity::hex(tx.value()),
      kind: UnsignedTransaction::TYPE,
      max_fee_per_gas: Quantity::hex(U256::from(tx.max_fee_per_gas())),
      max_priority_fee_per_gas: Quantity::hex(U256::from(tx.max_priority_fee_per_gas())),
      nonce: Quantity::Number(tx.nonce()),
      gas_limit: Quantity::hex(U256::from(tx.gas_limit())),
      chain_id: Quantity::Number(tx.chain_id()),
    }
  }
}
