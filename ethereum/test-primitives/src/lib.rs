#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

use rand_core::OsRng;

use k256::{ecdsa::SigningKey, ProjectivePoint};

use alloy_core::primitives::Address;

use ethereum_primitives::keccak256;

/// A signature as produced by an external signer, without its recovery ID.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RawSignature {
  /// The `r` scalar, big-endian.
  pub r: [u8; 32],
  /// The `s` scalar, big-endian.
  pub s: [u8; 32],
  /// The parity of the `y` coordinate of the nonce commitment.
  ///
  /// External signers don't provide this, yet it's kept so tests may check what's resolved.
  pub y_parity: bool,
}

/// Generate a random key.
pub fn test_key() -> SigningKey {
  SigningKey::random(&mut OsRng)
}

/// Derive a key from a seed, deterministically.
pub fn seeded_key(seed: &[u8]) -> SigningKey {
  let mut bytes = keccak256(seed);
  loop {
    if let Ok(key) = SigningKey::from_bytes(&bytes.into()) {
      return key;
    }
    bytes = keccak256(bytes);
  }
}

/// The address of a key.
pub fn address(key: &SigningKey) -> Address {
  ethereum_primitives::address(&ProjectivePoint::from(*key.verifying_key().as_affine()))
}

/// The compressed SEC1 encoding of a key's public key.
pub fn public_key(key: &SigningKey) -> Vec<u8> {
  key.verifying_key().to_encoded_point(true).as_bytes().to_vec()
}

/// Sign a 32-byte hash.
///
/// The signature is deterministic (RFC 6979) and has a low `s`.
pub fn sign(key: &SigningKey, hash: [u8; 32]) -> RawSignature {
  let (signature, recovery_id) = key.sign_prehash_recoverable(&hash).unwrap();
  let (r, s) = signature.split_bytes();
  RawSignature { r: r.into(), s: s.into(), y_parity: recovery_id.is_y_odd() }
}
