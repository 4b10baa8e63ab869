#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

use k256::{
  ecdsa::{RecoveryId, Signature, VerifyingKey},
  FieldBytes, NonZeroScalar, ProjectivePoint,
};

use alloy_core::primitives::{Address, U256, PrimitiveSignature};

mod candidates;
pub use candidates::*;


/// Input which was malformed, rejected before any recovery was attempted.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum MalformedInput {
  /// The hash wasn't 32 bytes.
  #[error("hash was {0} bytes, expected 32")]
  HashLength(usize),
  /// A scalar wasn't 32 bytes.
  #[error("{scalar} was {length} bytes, expected 32")]
  ScalarLength {
    /// The scalar which was malformed.
    scalar: &'static str,
    /// Its length.
    length: usize,
  },
  /// A scalar was zero or not reduced.
  #[error("{0} was zero or not less than the order of secp256k1")]
  InvalidScalar(&'static str),
  /// A value couldn't be interpreted as a recovery ID.
  #[error("{0} isn't a recovery ID")]
  RecoveryId(u64),
  /// No candidate recovery IDs were specified.
  #[error("no candidate recovery IDs were specified")]
  NoCandidates,
}

/// An error when resolving a signature.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum RecoveryError {
  /// The input was malformed.
  #[error("malformed input: {0}")]
  MalformedInput(#[from] MalformedInput),
  /// No candidate recovery ID recovered the expected address.
  ///
  /// The signature may be malformed, may be for a hash from another domain, or the expected
  /// address may be incorrect.
  #[error("no candidate recovery ID recovered {expected}")]
  NoMatchingRecoveryId {
    /// The address expected.
    expected: Address,
  },
}

/// A signature whose recovery ID was resolved.
///
/// Recovering the signer from this signature and the hash it was resolved for yields the expected
/// address.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ResolvedSignature {
  r: [u8; 32],
  s: [u8; 32],
  recovery_id: CandidateRecoveryId,
  signer: Address,
  transaction_signature: PrimitiveSignature,
}

impl ResolvedSignature {
  /// The `r` scalar, as supplied.
  pub fn r(&self) -> [u8; 32] {
    self.r
  }

  /// The `s` scalar, as supplied.
  pub fn s(&self) -> [u8; 32] {
    self.s
  }

  /// The candidate recovery ID which recovered the signer.
  pub fn recovery_id(&self) -> CandidateRecoveryId {
    self.recovery_id
  }

  /// The `v` value of the candidate recovery ID which recovered the signer.
  pub fn v(&self) -> u64 {
    self.recovery_id.value()
  }

  /// The parity of the `y` coordinate for the signature as supplied.
  pub fn y_parity(&self) -> bool {
    self.recovery_id.y_parity()
  }

  /// The signer recovered, which equals the expected address.
  pub fn signer(&self) -> Address {
    self.signer
  }

  /// The 65-byte `r || s || v` encoding, with `v` as `27 + y_parity`.
  pub fn to_bytes(&self) -> [u8; 65] {
    let mut res = [0; 65];
    res[.. 32].copy_from_slice(&self.r);
    res[32 .. 64].copy_from_slice(&self.s);
    res[64] = 27 + u8::from(self.y_parity());
    res
  }

  /// The signature to include within a transaction.
  ///
  /// Ethereum only accepts signatures with a low `s`. If the supplied `s` was high, it's negated
  /// and the `y` parity flipped, which recovers the same signer.
  pub fn transaction_signature(&self) -> PrimitiveSignature {
    self.transaction_signature
  }
}

// Normalize a signature to a low `s`, flipping the `y` parity if it was negated
fn normalize(signature: &Signature, y_parity: bool) -> (Signature, bool) {
  match signature.normalize_s() {
    Some(normalized) => (normalized, !y_parity),
    None => (signature.clone(), y_parity),
  }
}

fn scalar(name: &'static str, bytes: &[u8]) -> Result<[u8; 32], MalformedInput> {
  let bytes = <[u8; 32]>::try_from(bytes)
    .map_err(|_| MalformedInput::ScalarLength { scalar: name, length: bytes.len() })?;
  if bool::from(NonZeroScalar::from_repr(FieldBytes::from(bytes)).is_none()) {
    Err(MalformedInput::InvalidScalar(name))?;
  }
  Ok(bytes)
}

/// Recover the address which produced a signature over a hash.
///
/// Returns `None` if no public key is recoverable. High `s` values are accepted.
pub fn recover_address(hash: &[u8; 32], signature: &Signature, y_parity: bool) -> Option<Address> {
  // k256 only recovers from signatures with a low `s`
  let (signature, y_parity) = normalize(signature, y_parity);
  let key =
    VerifyingKey::recover_from_prehash(hash, &signature, RecoveryId::new(y_parity, false)).ok()?;
  Some(ethereum_primitives::address(&ProjectivePoint::from(*key.as_affine())))
}

/// Resolve the recovery ID for a signature.
///
/// Each candidate is tried in order, with the first to recover the expected address returned. The
/// hash must be the hash which was signed, whether that's the hash of a transaction or of a
/// personal message.
pub fn resolve(
  hash: &[u8],
  r: &[u8],
  s: &[u8],
  candidates: &CandidateRecoveryIds,
  expected: Address,
) -> Result<ResolvedSignature, RecoveryError> {
  let hash = <&[u8; 32]>::try_from(hash).map_err(|_| MalformedInput::HashLength(hash.len()))?;
  let r = scalar("r", r)?;
  let s = scalar("s", s)?;
  let signature =
    Signature::from_scalars(r, s).map_err(|_| MalformedInput::InvalidScalar("signature"))?;

  for recovery_id in candidates.iter() {
    if recover_address(hash, &signature, recovery_id.y_parity()) == Some(expected) {
      let (normalized, y_parity) = normalize(&signature, recovery_id.y_parity());
      let (normalized_r, normalized_s) = normalized.split_bytes();
      let transaction_signature = PrimitiveSignature::new(
        U256::from_be_slice(&normalized_r),
        U256::from_be_slice(&normalized_s),
        y_parity,
      );
      return Ok(ResolvedSignature { r, s, recovery_id, signer: expected, transaction_signature });
    }
  }
  Err(RecoveryError::NoMatchingRecoveryId { expected })
}
