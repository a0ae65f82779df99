//! Task descriptor and option defaults supplied by the orchestration layer.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Sentinel revision strategy meaning "no content tracking".
pub const REVISION_SEQ_DATE: &str = "seq+date";

/// One pattern or an ordered list of patterns.
///
/// Task descriptor fields accept either shape; callers normalise to a vector
/// with [`PatternList::to_vec`] before use.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
  /// A single pattern string.
  One(String),
  /// An ordered list of pattern strings.
  Many(Vec<String>),
}

impl PatternList {
  /// Normalise to a vector regardless of the input shape.
  pub fn to_vec(&self) -> Vec<String> {
    match self {
      PatternList::One(pattern) => vec![pattern.clone()],
      PatternList::Many(patterns) => patterns.clone(),
    }
  }
}

impl Default for PatternList {
  fn default() -> Self {
    PatternList::Many(Vec::new())
  }
}

/// Cache input, either a bare pattern list or the structured form.
///
/// The structured form separates glob `patterns`, resolved against the
/// filesystem, from opaque `literals` that pass through unmodified: never
/// glob-matched, never rewritten with a base URL, appended to the cache list
/// as given.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CacheSource {
  /// Structured form separating glob patterns from pass-through literals.
  Structured {
    /// Glob expressions expanded against the base path.
    #[serde(default)]
    patterns: PatternList,
    /// Opaque entries appended to the cache list unchanged.
    #[serde(default)]
    literals: PatternList,
  },
  /// Bare pattern or pattern list; every entry is glob-expanded.
  Flat(PatternList),
}

/// Options controlling manifest assembly.
///
/// Constructed once per invocation by merging caller overrides onto these
/// fixed defaults, and immutable thereafter. Never process-global.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskOptions {
  /// Filesystem root against which relative patterns and hashing reads
  /// resolve. Defaults to the current working directory.
  pub base_path: PathBuf,
  /// Optional deployment base URL prefixed onto expanded cache entries.
  pub base_url: Option<String>,
  /// Whether the manifest's own destination is excluded from its cache list.
  pub ignore_manifest: bool,
  /// Whether the generated manifest sets the `prefer-online` flag.
  pub prefer_online: bool,
  /// Revision strategy name. Absent or equal to [`REVISION_SEQ_DATE`] keeps
  /// the fixed sequence marker; any other value selects content digests.
  pub revision: Option<String>,
}

impl Default for TaskOptions {
  fn default() -> Self {
    Self {
      base_path: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
      base_url: None,
      ignore_manifest: true,
      prefer_online: false,
      revision: None,
    }
  }
}

impl TaskOptions {
  /// Whether a content digest replaces the default sequence revision.
  pub fn use_content_digest(&self) -> bool {
    self
      .revision
      .as_deref()
      .is_some_and(|strategy| strategy != REVISION_SEQ_DATE)
  }
}

/// Task descriptor naming the manifest destination and its resource inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheTask {
  /// Path the manifest is written to.
  pub dest: PathBuf,
  /// Patterns whose matches are excluded from the cache section.
  #[serde(default)]
  pub ignored: Option<PatternList>,
  /// Cache section input, flat or structured.
  #[serde(default)]
  pub cache: Option<CacheSource>,
  /// Entries for the NETWORK section, passed through without expansion.
  #[serde(default)]
  pub network: Option<PatternList>,
  /// Entries for the FALLBACK section, one `<online> <fallback>` pair each.
  #[serde(default)]
  pub fallback: Option<PatternList>,
  /// Options merged onto the fixed defaults.
  #[serde(default)]
  pub options: TaskOptions,
}

impl CacheTask {
  /// Load a task descriptor from a JSON file.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|err| {
      Error::Config(format!("malformed task descriptor {}: {err}", path.display()))
    })
  }
}
