#![cfg_attr(docsrs, feature(doc_auto_cfg))]

/// Obtain a variable from the environment.
///
/// Empty values are treated as unset.
pub fn var(variable: &str) -> Option<String> {
  std::env::var(variable).ok().filter(|value| !value.is_empty())
}

/// Obtain a variable from the environment, falling back to a default.
pub fn var_or(variable: &str, default: &str) -> String {
  var(variable).unwrap_or_else(|| default.to_string())
}
