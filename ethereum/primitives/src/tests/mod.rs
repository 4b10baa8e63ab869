use core::str::FromStr;

use k256::ProjectivePoint;

use alloy_core::primitives::{Address, U256, PrimitiveSignature};
use alloy_consensus::SignableTransaction;

use crate::*;

fn mumbai_transfer(nonce: u64) -> UnsignedTransaction {
  UnsignedTransaction::new(Eip1559Fields {
    to: Address::from_str("0x4F9EF07A6DDF73494D2fF51A8f7B78e9c5815eb2").unwrap(),
    value: parse_ether("0.00000001").unwrap(),
    max_fee_per_gas: 0x59682f1e,
    max_priority_fee_per_gas: 0x59682f00,
    nonce,
    gas_limit: 0x5208,
    chain_id: 80001,
  })
  .unwrap()
}

#[test]
fn test_keccak256() {
  assert_eq!(
    hex::encode(keccak256(b"")),
    "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
  );
}

#[test]
fn test_personal_message_hash() {
  let hash = personal_message_hash("hello world");
  assert_eq!(
    hex::encode(hash),
    "d9eba16ed0ecae432b71fe008c98cc872bb4cc214d3220a36f365326cf807d68"
  );

  // The prefix commits to the length in decimal
  let mut preimage = b"\x19Ethereum Signed Message:\n11".to_vec();
  preimage.extend(b"hello world");
  assert_eq!(hash, keccak256(preimage));

  // The message hash isn't the hash of the message
  assert_ne!(hash, keccak256("hello world"));
}

#[test]
fn test_address() {
  // The address for the private key 1
  let expected = Address::from_str("0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf").unwrap();
  assert_eq!(address(&ProjectivePoint::GENERATOR), expected);

  let compressed =
    hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798").unwrap();
  assert_eq!(address_from_public_key(&compressed), Some(expected));

  let uncompressed = hex::decode(
    "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
     483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
  )
  .unwrap();
  assert_eq!(address_from_public_key(&uncompressed), Some(expected));

  assert_eq!(address_from_public_key(&compressed[.. 32]), None);
  assert_eq!(address_from_public_key(&[0; 33]), None);
}

#[test]
fn test_parse_ether() {
  assert_eq!(parse_ether("0.00000001").unwrap(), U256::from(10_000_000_000u64));
  assert_eq!(parse_ether("1").unwrap(), U256::from(1_000_000_000_000_000_000u128));
  assert!(parse_ether("one").is_err());
}

#[test]
fn test_serialization_is_deterministic() {
  let tx = mumbai_transfer(7);
  let serialized = tx.serialize();
  assert_eq!(serialized, mumbai_transfer(7).serialize());
  assert_eq!(tx.hash(), mumbai_transfer(7).hash());

  assert_eq!(
    hex::encode(&serialized),
    "02ef83013881078459682f008459682f1e825208944f9ef07a6ddf73494d2ff51a8f7b78e9c5815eb2\
     8502540be40080c0"
  );
  assert_eq!(tx.hash(), <[u8; 32]>::from(tx.tx().signature_hash()));

  // The nonce is bound
  assert_ne!(tx.hash(), mumbai_transfer(8).hash());
}

#[test]
fn test_priority_fee_bound() {
  let res = UnsignedTransaction::new(Eip1559Fields {
    to: Address::ZERO,
    value: U256::ZERO,
    max_fee_per_gas: 1,
    max_priority_fee_per_gas: 2,
    nonce: 0,
    gas_limit: 21_000,
    chain_id: 1,
  });
  assert_eq!(
    res,
    Err(TransactionError::PriorityFeeExceedsMaxFee {
      max_fee_per_gas: 1,
      max_priority_fee_per_gas: 2
    })
  );
}

#[test]
fn test_signed_bytes() {
  let tx = mumbai_transfer(0);
  let signature = PrimitiveSignature::new(U256::from(1), U256::from(2), true);
  let signed = tx.signed_bytes(signature);
  assert_eq!(signed[0], UnsignedTransaction::TYPE);
  // The signed encoding commits to the signature
  let flipped = PrimitiveSignature::new(U256::from(1), U256::from(2), false);
  assert_ne!(signed, tx.signed_bytes(flipped));
}

#[test]
fn test_transaction_file() {
  let tx = mumbai_transfer(3);
  let json = serde_json::to_value(&tx).unwrap();
  assert_eq!(
    json,
    serde_json::json!({
      "to": "0x4F9EF07A6DDF73494D2fF51A8f7B78e9c5815eb2",
      "value": "0x2540be400",
      "type": 2,
      "maxFeePerGas": "0x59682f1e",
      "maxPriorityFeePerGas": "0x59682f00",
      "nonce": 3,
      "gasLimit": "0x5208",
      "chainId": 80001,
    })
  );
  assert_eq!(serde_json::from_value::<UnsignedTransaction>(json).unwrap(), tx);

  // The file written by ethers, with its BigNumber encoding for the value
  let ethers = r#"{
    "to": "0x4F9EF07A6DDF73494D2fF51A8f7B78e9c5815eb2",
    "value": { "type": "BigNumber", "hex": "0x02540be400" },
    "type": 2,
    "maxFeePerGas": "0x59682f1e",
    "maxPriorityFeePerGas": "0x59682f00",
    "nonce": 3,
    "gasLimit": "0x5208",
    "chainId": 80001
  }"#;
  assert_eq!(serde_json::from_str::<UnsignedTransaction>(ethers).unwrap(), tx);

  let legacy = ethers.replace("\"type\": 2", "\"type\": 0");
  assert!(serde_json::from_str::<UnsignedTransaction>(&legacy).is_err());

  let bad_address = ethers.replace("0x4F9EF07A6DDF73494D2fF51A8f7B78e9c5815eb2", "0x4F9E");
  assert!(serde_json::from_str::<UnsignedTransaction>(&bad_address).is_err());
}

#[test]
fn test_transaction_file_quantities() {
  let tx = UnsignedTransaction::new(Eip1559Fields {
    to: Address::from_str("0xCa7539fF485cbF44cd4238433206c4FD29876155").unwrap(),
    value: U256::MAX,
    max_fee_per_gas: u128::MAX,
    max_priority_fee_per_gas: 1,
    nonce: u64::MAX,
    gas_limit: u64::MAX,
    chain_id: 1,
  })
  .unwrap();
  assert_eq!(tx.to(), Address::from_str("0xCa7539fF485cbF44cd4238433206c4FD29876155").unwrap());

  let json = serde_json::to_value(&tx).unwrap();
  assert_eq!(json["value"], format!("0x{}", "f".repeat(64)));
  assert_eq!(json["maxFeePerGas"], format!("0x{}", "f".repeat(32)));
  assert_eq!(json["maxPriorityFeePerGas"], "0x1");
  assert_eq!(json["gasLimit"], "0xffffffffffffffff");
  assert_eq!(json["nonce"], u64::MAX);
  assert_eq!(serde_json::from_value::<UnsignedTransaction>(json.clone()).unwrap(), tx);

  // A gas limit which doesn't fit within a u64
  let mut overflow = json;
  overflow["gasLimit"] = "0x10000000000000000".into();
  let error = serde_json::from_value::<UnsignedTransaction>(overflow).unwrap_err();
  assert!(error.to_string().contains(&TransactionError::QuantityOverflow("gasLimit").to_string()));
}
