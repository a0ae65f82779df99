//! Manifest value objects produced by assembly and consumed by serialisation.

use std::fmt;

use chrono::{DateTime, Utc};

/// Revision identifier recorded in the manifest header comment.
///
/// With the default `seq+date` strategy every invocation stamps the fixed
/// sequence value `1`; distinctness between runs comes from the generation
/// timestamp alone. Selecting any other strategy replaces the marker with a
/// content digest over the cache list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
  /// Fixed sequence marker used when content tracking is disabled.
  Sequence(u32),
  /// Lowercase hex digest computed over the cache entry list and file bytes.
  Digest(String),
}

impl Revision {
  /// Parse a revision token from a manifest header comment.
  ///
  /// Tokens that fit a `u32` become sequence markers; anything else is taken
  /// to be a content digest. The digests this crate emits are 64 hex
  /// characters and overflow `u32` even when all-digit, so they always
  /// survive the round trip; a short all-digit token from another generator
  /// is ambiguous and reads back as a sequence marker.
  pub fn parse(token: &str) -> Self {
    match token.parse::<u32>() {
      Ok(sequence) => Revision::Sequence(sequence),
      Err(_) => Revision::Digest(token.to_string()),
    }
  }
}

impl Default for Revision {
  fn default() -> Self {
    Revision::Sequence(1)
  }
}

impl fmt::Display for Revision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Revision::Sequence(sequence) => write!(f, "{sequence}"),
      Revision::Digest(digest) => f.write_str(digest),
    }
  }
}

/// Version stamp distinguishing a generated manifest from earlier output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestVersion {
  /// Revision marker, sequence or content digest.
  pub revision: Revision,
  /// Generation timestamp, recorded at whole-second precision.
  pub date: DateTime<Utc>,
}

/// Cache manifest value object.
///
/// All list fields preserve the order produced by assembly; serialisation
/// never re-sorts them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
  /// Revision identifier and creation timestamp.
  pub version: ManifestVersion,
  /// Resources the client stores for offline use.
  pub cache: Vec<String>,
  /// Resources that always require a live connection.
  pub network: Vec<String>,
  /// Substitute-on-failure mappings, one `<online> <fallback>` pair per entry.
  pub fallback: Vec<String>,
  /// Mode flags, currently only `prefer-online`.
  pub settings: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_sequence_revisions() {
    assert_eq!(Revision::parse("1"), Revision::Sequence(1));
    assert_eq!(Revision::parse("42"), Revision::Sequence(42));
  }

  #[test]
  fn parses_digest_revisions() {
    assert_eq!(
      Revision::parse("9f86d081884c7d65"),
      Revision::Digest("9f86d081884c7d65".to_string())
    );
  }

  #[test]
  fn all_digit_tokens_of_digest_width_stay_digests() {
    let token = "1".repeat(64);
    assert_eq!(Revision::parse(&token), Revision::Digest(token.clone()));
  }

  #[test]
  fn displays_round_trip_tokens() {
    assert_eq!(Revision::Sequence(1).to_string(), "1");
    assert_eq!(Revision::Digest("abc123".to_string()).to_string(), "abc123");
  }
}
