//! Content digests binding a manifest revision to the cached file set.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::paths::is_remote;

/// Digest the cache entry list and the bytes of every local entry.
///
/// The newline-joined entry list is hashed before any file contents, so
/// renaming or reordering entries changes the digest even when every file's
/// bytes are unchanged. Remote URL entries contribute their entry string to
/// that first pass only; no byte read is attempted for them.
///
/// Fails with [`Error::Io`] on the first unreadable local entry; no partial
/// digest is returned.
pub fn digest_entries(entries: &[String], base_dir: &Path) -> Result<String> {
  digest_entries_with(entries, base_dir, |path| {
    tracing::debug!(path = %path.display(), "hashing cache entry");
  })
}

/// Digest entries with a caller-supplied observer.
///
/// The observer is invoked with the resolved path of each local entry just
/// before its bytes are read. It exists purely for progress reporting and has
/// no influence on the digest value.
pub fn digest_entries_with<F>(entries: &[String], base_dir: &Path, mut observer: F) -> Result<String>
where
  F: FnMut(&Path),
{
  let mut hasher = Sha256::new();
  hasher.update(entries.join("\n").as_bytes());

  for entry in entries {
    if is_remote(entry) {
      continue;
    }
    let path = base_dir.join(entry);
    observer(&path);
    let bytes = fs::read(&path).map_err(|source| Error::Io {
      path: path.clone(),
      source,
    })?;
    hasher.update(&bytes);
  }

  Ok(hex::encode(hasher.finalize()))
}
