use crate::MalformedInput;

/// A candidate value for the `v` of a signature.
///
/// Three encodings are accepted: the raw `y` parity (`0`, `1`), the pre-EIP-155 encoding
/// (`27`, `28`), and the EIP-155 encoding (`chain_id * 2 + 35 + y_parity`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CandidateRecoveryId(u64);

impl CandidateRecoveryId {
  /// Interpret a `v` value as a candidate recovery ID.
  pub fn new(v: u64) -> Result<Self, MalformedInput> {
    match v {
      0 | 1 | 27 | 28 | 35 .. => Ok(Self(v)),
      _ => Err(MalformedInput::RecoveryId(v)),
    }
  }

  /// The `v` value.
  pub fn value(self) -> u64 {
    self.0
  }

  /// The parity of the `y` coordinate this candidate claims.
  pub fn y_parity(self) -> bool {
    match self.0 {
      0 | 1 => self.0 == 1,
      27 | 28 => self.0 == 28,
      v => ((v - 35) % 2) == 1,
    }
  }

  /// The chain ID bound by this candidate, if it's EIP-155 encoded.
  pub fn chain_id(self) -> Option<u64> {
    (self.0 >= 35).then(|| (self.0 - 35) / 2)
  }
}

/// An ordered, non-empty list of candidate recovery IDs.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CandidateRecoveryIds(Vec<CandidateRecoveryId>);

impl CandidateRecoveryIds {
  /// Create a list of candidates from `v` values.
  ///
  /// The candidates are tried in the order specified.
  pub fn new(values: impl IntoIterator<Item = u64>) -> Result<Self, MalformedInput> {
    let candidates =
      values.into_iter().map(CandidateRecoveryId::new).collect::<Result<Vec<_>, _>>()?;
    if candidates.is_empty() {
      Err(MalformedInput::NoCandidates)?;
    }
    Ok(Self(candidates))
  }

  /// The candidates used for messages signed via `personal_sign`, `[27, 28]`.
  pub fn legacy() -> Self {
    Self(vec![CandidateRecoveryId(27), CandidateRecoveryId(28)])
  }

  /// The raw `y` parities, `[0, 1]`.
  pub fn y_parity() -> Self {
    Self(vec![CandidateRecoveryId(0), CandidateRecoveryId(1)])
  }

  /// The EIP-155 candidates for a chain, `[chain_id * 2 + 35, chain_id * 2 + 36]`.
  ///
  /// Returns `None` if these would overflow a `u64`.
  pub fn eip155(chain_id: u64) -> Option<Self> {
    let even = chain_id.checked_mul(2)?.checked_add(35)?;
    let odd = even.checked_add(1)?;
    Some(Self(vec![CandidateRecoveryId(even), CandidateRecoveryId(odd)]))
  }

  /// Iterate over the candidates, in order.
  pub fn iter(&self) -> impl Iterator<Item = CandidateRecoveryId> + '_ {
    self.0.iter().copied()
  }
}
