use serde::Serialize;

use ethereum_primitives::{address_from_public_key, personal_message_hash};
use recovery::{CandidateRecoveryId, CandidateRecoveryIds, MalformedInput, resolve};

use crate::{
  Error,
  config::parse_recovery_id,
  artifacts::{Artifacts, decode_hex},
};

/// A signature over a personal message.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) struct MessageSignature {
  pub(crate) message: String,
  /// The checksummed address of the signer.
  pub(crate) address: String,
  /// The 65-byte `r || s || v` signature, as `0x`-prefixed hex.
  pub(crate) signature: String,
}

/// Verify the signature result is a signature over a personal message.
#[derive(Clone, Debug, clap::Args)]
pub(crate) struct VerifyMessage {
  #[arg(long, default_value = "hello world")]
  pub(crate) message: String,
  /// The recovery IDs to try, in order.
  #[arg(
    long,
    value_delimiter = ',',
    value_parser = parse_recovery_id,
    default_values_t = [28u64, 27]
  )]
  pub(crate) candidates: Vec<u64>,
}

/// Resolve the signature result against the EIP-191 hash of a message.
pub(crate) fn verify_message(
  artifacts: &Artifacts,
  args: VerifyMessage,
) -> Result<MessageSignature, Error> {
  let signature = artifacts.read_signature_result()?;
  let expected = address_from_public_key(&signature.public_key)
    .ok_or_else(|| Error::InvalidPublicKey(hex::encode(&signature.public_key)))?;
  let candidates = CandidateRecoveryIds::new(args.candidates)?;

  let hash = personal_message_hash(&args.message);
  let resolved = resolve(&hash, &signature.r, &signature.s, &candidates, expected)?;
  log::info!("signature over {:?} resolved with recovery ID {}", args.message, resolved.v());

  Ok(MessageSignature {
    message: args.message,
    address: expected.to_string(),
    signature: format!("0x{}", hex::encode(resolved.to_bytes())),
  })
}

/// Assemble a signature from its parts, without verifying it.
#[derive(Clone, Debug, clap::Args)]
pub(crate) struct AssembleSignature {
  #[arg(long, default_value = "hello world")]
  pub(crate) message: String,
  /// The SEC1-encoded public key of the signer, as hex.
  #[arg(long)]
  pub(crate) public_key: String,
  #[arg(long)]
  pub(crate) r: String,
  #[arg(long)]
  pub(crate) s: String,
  #[arg(long, value_parser = parse_recovery_id, default_value = "27")]
  pub(crate) v: u64,
}

fn decode(field: &'static str, value: &str) -> Result<Vec<u8>, Error> {
  decode_hex(value).map_err(|reason| Error::Hex { field, reason })
}

pub(crate) fn assemble_signature(args: AssembleSignature) -> Result<MessageSignature, Error> {
  let public_key = decode("public key", &args.public_key)?;
  let address = address_from_public_key(&public_key)
    .ok_or_else(|| Error::InvalidPublicKey(args.public_key.clone()))?;

  let r = decode("r", &args.r)?;
  let s = decode("s", &args.s)?;
  for (scalar, bytes) in [("r", &r), ("s", &s)] {
    if bytes.len() != 32 {
      Err(MalformedInput::ScalarLength { scalar, length: bytes.len() })?;
    }
  }
  let v = CandidateRecoveryId::new(args.v)?;

  let mut signature = Vec::with_capacity(65);
  signature.extend(&r);
  signature.extend(&s);
  signature.push(27 + u8::from(v.y_parity()));
  log::warn!("assembled a signature for {address} without verifying it");

  Ok(MessageSignature {
    message: args.message,
    address: address.to_string(),
    signature: format!("0x{}", hex::encode(signature)),
  })
}
