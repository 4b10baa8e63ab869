use std::{
  io,
  fs,
  path::{Path, PathBuf},
};

use serde::{Serialize, Deserialize};

use ethereum_primitives::UnsignedTransaction;

/// The unsigned transaction.
pub(crate) const UNSIGNED_TRANSACTION: &str = "unsignedTx.json";
/// The hash for the external signer to sign, as hex without a `0x` prefix.
pub(crate) const MESSAGE_HASH: &str = "messageHash.txt";
/// The signature produced by the external signer.
pub(crate) const SIGNATURE_RESULT: &str = "signature_result.json";

/// An error when reading or writing an artifact.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ArtifactError {
  #[error("couldn't access {}: {source}", path.display())]
  Io { path: PathBuf, source: io::Error },
  #[error("couldn't parse {}: {source}", path.display())]
  Json { path: PathBuf, source: serde_json::Error },
  #[error("{} didn't contain a 32-byte hex hash", path.display())]
  Hash { path: PathBuf },
}

/// Decode hex, with an optional `0x` prefix.
pub(crate) fn decode_hex(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
  let value = value.trim();
  hex::decode(value.strip_prefix("0x").unwrap_or(value))
}

mod hex_bytes {
  use serde::{Serializer, Deserialize, Deserializer};

  pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
  }

  pub(super) fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Vec<u8>, D::Error> {
    let value = String::deserialize(deserializer)?;
    super::decode_hex(&value).map_err(serde::de::Error::custom)
  }
}

/// The result returned by the external signer.
///
/// Additional fields are ignored.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub(crate) struct SignatureResult {
  #[serde(rename = "R", with = "hex_bytes")]
  pub(crate) r: Vec<u8>,
  #[serde(rename = "S", with = "hex_bytes")]
  pub(crate) s: Vec<u8>,
  /// The SEC1-encoded public key of the signer.
  #[serde(with = "hex_bytes")]
  pub(crate) public_key: Vec<u8>,
}

/// The directory artifacts are exchanged through.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct Artifacts {
  directory: PathBuf,
}

impl Artifacts {
  pub(crate) fn new(directory: impl Into<PathBuf>) -> Artifacts {
    Artifacts { directory: directory.into() }
  }

  pub(crate) fn path(&self, name: &str) -> PathBuf {
    self.directory.join(name)
  }

  fn read(&self, name: &str) -> Result<(PathBuf, String), ArtifactError> {
    let path = self.path(name);
    match fs::read_to_string(&path) {
      Ok(contents) => Ok((path, contents)),
      Err(source) => Err(ArtifactError::Io { path, source }),
    }
  }

  fn write(&self, name: &str, contents: &str) -> Result<(), ArtifactError> {
    let io = |path: &Path, source| ArtifactError::Io { path: path.to_path_buf(), source };
    fs::create_dir_all(&self.directory).map_err(|e| io(&self.directory, e))?;
    let path = self.path(name);
    fs::write(&path, contents).map_err(|e| io(&path, e))?;
    log::debug!("wrote {}", path.display());
    Ok(())
  }

  fn read_json<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<T, ArtifactError> {
    let (path, contents) = self.read(name)?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Json { path, source })
  }

  fn write_json(&self, name: &str, value: &impl Serialize) -> Result<(), ArtifactError> {
    let contents = serde_json::to_string(value)
      .map_err(|source| ArtifactError::Json { path: self.path(name), source })?;
    self.write(name, &contents)
  }

  pub(crate) fn read_unsigned_transaction(&self) -> Result<UnsignedTransaction, ArtifactError> {
    self.read_json(UNSIGNED_TRANSACTION)
  }

  pub(crate) fn write_unsigned_transaction(
    &self,
    tx: &UnsignedTransaction,
  ) -> Result<(), ArtifactError> {
    self.write_json(UNSIGNED_TRANSACTION, tx)
  }

  /// Read the hash to sign, returning `None` if it hasn't been written.
  pub(crate) fn read_message_hash(&self) -> Result<Option<[u8; 32]>, ArtifactError> {
    let (path, contents) = match self.read(MESSAGE_HASH) {
      Ok(read) => read,
      Err(ArtifactError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
        return Ok(None)
      }
      Err(e) => return Err(e),
    };
    let hash = decode_hex(&contents).ok().and_then(|hash| <[u8; 32]>::try_from(hash).ok());
    hash.map(Some).ok_or(ArtifactError::Hash { path })
  }

  pub(crate) fn write_message_hash(&self, hash: [u8; 32]) -> Result<(), ArtifactError> {
    self.write(MESSAGE_HASH, &hex::encode(hash))
  }

  pub(crate) fn read_signature_result(&self) -> Result<SignatureResult, ArtifactError> {
    self.read_json(SIGNATURE_RESULT)
  }

  #[cfg(test)]
  pub(crate) fn write_signature_result(
    &self,
    result: &SignatureResult,
  ) -> Result<(), ArtifactError> {
    self.write_json(SIGNATURE_RESULT, result)
  }
}
