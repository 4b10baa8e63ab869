#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

use k256::{elliptic_curve::sec1::ToEncodedPoint, ProjectivePoint};

use alloy_core::primitives::Address;

mod transaction;
pub use transaction::*;

#[cfg(test)]
mod tests;

/// The Keccak256 hash function.
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
  alloy_core::primitives::keccak256(data.as_ref()).into()
}

/// The hash of a message signed via `personal_sign`, as defined by EIP-191 (version `0x45`).
///
/// This is `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`, where the
/// length is the decimal representation of the message's length in bytes.
pub fn personal_message_hash(message: impl AsRef<[u8]>) -> [u8; 32] {
  alloy_core::primitives::eip191_hash_message(message.as_ref()).into()
}

/// The address for a point.
pub fn address(point: &ProjectivePoint) -> Address {
  let encoded_point = point.to_encoded_point(false);
  // Last 20 bytes of the hash of the concatenated x and y coordinates
  // We obtain the concatenated x and y coordinates via the uncompressed encoding of the point
  Address::from_slice(&keccak256(&encoded_point.as_ref()[1 .. 65])[12 ..])
}

/// The address for a SEC1-encoded public key.
///
/// Both the compressed (33-byte) and uncompressed (65-byte) encodings are accepted. Returns `None`
/// if the bytes aren't a valid encoding of a point on secp256k1, or encode the identity.
pub fn address_from_public_key(sec1: &[u8]) -> Option<Address> {
  let key = k256::PublicKey::from_sec1_bytes(sec1).ok()?;
  Some(address(&key.to_projective()))
}
