//! Error taxonomy shared by pattern expansion, hashing and serialisation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Generic result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced while assembling or parsing a cache manifest.
///
/// Expansion and hashing fail fast and never return partial results; the
/// assembler surfaces the first failure unchanged and leaves recovery to the
/// orchestration layer.
#[derive(Debug, Error)]
pub enum Error {
  /// A glob expression failed to compile.
  #[error("invalid pattern '{pattern}': {source}")]
  Pattern {
    /// The offending glob expression as supplied by the task descriptor.
    pattern: String,
    /// Compile failure reported by the glob engine.
    #[source]
    source: glob::PatternError,
  },

  /// A source file could not be read or the destination could not be written.
  #[error("{}: {source}", .path.display())]
  Io {
    /// Path involved in the failed operation.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: io::Error,
  },

  /// The task descriptor was malformed.
  #[error("{0}")]
  Config(String),

  /// Manifest text did not conform to the canonical layout.
  #[error("malformed manifest: {0}")]
  Manifest(String),
}
