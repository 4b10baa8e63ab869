use recovery::{CandidateRecoveryIds, resolve};

use crate::{Error, config::parse_recovery_id, artifacts::Artifacts, rpc::{Receipt, Rpc}};

/// Finalize the signed transaction and publish it.
#[derive(Clone, Debug, Default, clap::Args)]
pub(crate) struct SubmitTransaction {
  /// The recovery IDs to try, in order.
  ///
  /// Defaults to the EIP-155 recovery IDs for the transaction's chain.
  #[arg(long, value_delimiter = ',', value_parser = parse_recovery_id)]
  pub(crate) candidates: Vec<u64>,
}

/// Resolve the signature for the unsigned transaction and publish the signed transaction.
///
/// Nothing is published if the signature doesn't resolve.
pub(crate) async fn submit_transaction(
  rpc: &impl Rpc,
  artifacts: &Artifacts,
  args: SubmitTransaction,
) -> Result<Receipt, Error> {
  let tx = artifacts.read_unsigned_transaction()?;
  let hash = tx.hash();
  if let Some(written) = artifacts.read_message_hash()? {
    if written != hash {
      log::warn!(
        "message hash 0x{} doesn't match the transaction's hash 0x{}",
        hex::encode(written),
        hex::encode(hash)
      );
    }
  }

  let signature = artifacts.read_signature_result()?;
  let expected = ethereum_primitives::address_from_public_key(&signature.public_key)
    .ok_or_else(|| Error::InvalidPublicKey(hex::encode(&signature.public_key)))?;

  let candidates = if args.candidates.is_empty() {
    CandidateRecoveryIds::eip155(tx.chain_id()).ok_or(Error::ChainIdOverflow(tx.chain_id()))?
  } else {
    CandidateRecoveryIds::new(args.candidates)?
  };

  let resolved = resolve(&hash, &signature.r, &signature.s, &candidates, expected)?;
  log::info!("resolved recovery ID {} for {}", resolved.v(), resolved.signer());

  let receipt = rpc.publish(tx.signed_bytes(resolved.transaction_signature())).await?;
  match receipt.block_number {
    Some(block) => {
      log::info!("transaction {} was included in block {block}", receipt.transaction_hash)
    }
    None => log::info!("transaction {} was included", receipt.transaction_hash),
  }
  if !receipt.status {
    log::error!("transaction {} reverted", receipt.transaction_hash);
    Err(Error::Reverted(receipt.transaction_hash))?;
  }
  Ok(receipt)
}
