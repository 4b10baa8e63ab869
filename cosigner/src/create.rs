use alloy_core::primitives::Address;

use ethereum_primitives::{Eip1559Fields, UnsignedTransaction, parse_ether};

use crate::{
  Error,
  config::{parse_address, parse_quantity},
  artifacts::Artifacts,
  rpc::Rpc,
};

/// Create an EIP-1559 transfer for an external signer to sign.
#[derive(Clone, Debug, clap::Args)]
pub(crate) struct CreateTransaction {
  /// The address which will sign the transaction.
  #[arg(long, value_parser = parse_address)]
  pub(crate) from: Address,
  /// The recipient.
  #[arg(long, value_parser = parse_address)]
  pub(crate) to: Address,
  /// The amount to transfer, in ether.
  #[arg(long)]
  pub(crate) value: String,
  #[arg(long, value_parser = parse_quantity::<u128>)]
  pub(crate) max_fee_per_gas: u128,
  #[arg(long, value_parser = parse_quantity::<u128>)]
  pub(crate) max_priority_fee_per_gas: u128,
  #[arg(long, value_parser = parse_quantity::<u64>, default_value = "21000")]
  pub(crate) gas_limit: u64,
  #[arg(long, value_parser = parse_quantity::<u64>)]
  pub(crate) chain_id: u64,
}

/// Build the transaction with the signer's next nonce, then write it and its hash as artifacts.
pub(crate) async fn create_transaction(
  rpc: &impl Rpc,
  artifacts: &Artifacts,
  args: &CreateTransaction,
) -> Result<UnsignedTransaction, Error> {
  let value = parse_ether(&args.value)?;
  let nonce = rpc.transaction_count(args.from).await?;
  log::debug!("{} has sent {nonce} transactions", args.from);

  let tx = UnsignedTransaction::new(Eip1559Fields {
    to: args.to,
    value,
    max_fee_per_gas: args.max_fee_per_gas,
    max_priority_fee_per_gas: args.max_priority_fee_per_gas,
    nonce,
    gas_limit: args.gas_limit,
    chain_id: args.chain_id,
  })?;

  let hash = tx.hash();
  artifacts.write_unsigned_transaction(&tx)?;
  artifacts.write_message_hash(hash)?;
  log::info!("transaction to sign has hash 0x{}", hex::encode(hash));
  Ok(tx)
}
