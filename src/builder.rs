//! Assemble cache manifests from task data and per-invocation options.

use chrono::{SubsecRound, Utc};

use crate::config::{CacheSource, CacheTask, PatternList, TaskOptions};
use crate::digest::digest_entries;
use crate::error::Result;
use crate::expand::expand_patterns;
use crate::models::{Manifest, ManifestVersion, Revision};
use crate::paths::{absolutize, join_url, normalize, relativize};

/// Setting token emitted when the prefer-online flag is set.
const PREFER_ONLINE: &str = "prefer-online";

/// Assemble a manifest value from the supplied task data and options.
///
/// Reads the filesystem for pattern expansion and content hashing but has no
/// other side effects; writing the result is a separate step handled by
/// [`crate::format::write_manifest`]. Expansion and hashing failures surface
/// unchanged, leaving the decision whether they are fatal to the caller.
pub fn assemble(task: &CacheTask, options: &TaskOptions) -> Result<Manifest> {
  // A relative destination is spelled against the working directory, not the
  // base path; absolutize it so the lexical relativization below lines up
  // with the relativized cache entries.
  let dest = normalize(&absolutize(&task.dest));

  let mut ignored = match &task.ignored {
    Some(patterns) => expand_patterns(&patterns.to_vec(), Some(&options.base_path))?,
    None => Vec::new(),
  };
  if options.ignore_manifest {
    ignored.push(relativize(&options.base_path, &dest));
  }

  let (patterns, literals) = match &task.cache {
    Some(CacheSource::Flat(patterns)) => (patterns.to_vec(), Vec::new()),
    Some(CacheSource::Structured { patterns, literals }) => (patterns.to_vec(), literals.to_vec()),
    None => (Vec::new(), Vec::new()),
  };

  let mut cache: Vec<String> = expand_patterns(&patterns, Some(&options.base_path))?
    .into_iter()
    .filter(|entry| !ignored.contains(entry))
    .collect();

  if let Some(base_url) = options.base_url.as_deref() {
    cache = cache
      .into_iter()
      .map(|entry| join_url([base_url, entry.as_str()]))
      .collect();
  }

  // Literals land after base-URL rewriting; they are typically already
  // absolute and must reach the manifest byte-for-byte as authored.
  cache.extend(literals);

  let revision = if options.use_content_digest() {
    Revision::Digest(digest_entries(&cache, &options.base_path)?)
  } else {
    Revision::default()
  };

  Ok(Manifest {
    version: ManifestVersion {
      revision,
      date: Utc::now().trunc_subsecs(0),
    },
    cache,
    network: task.network.as_ref().map(PatternList::to_vec).unwrap_or_default(),
    fallback: task.fallback.as_ref().map(PatternList::to_vec).unwrap_or_default(),
    settings: if options.prefer_online {
      vec![PREFER_ONLINE.to_string()]
    } else {
      Vec::new()
    },
  })
}
