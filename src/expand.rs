//! Expand glob patterns into the ordered list of manifest entries.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::paths::{is_remote, relativize};

/// Expand glob patterns into an ordered, distinct list of entry strings.
///
/// A candidate is admitted when it is a regular file on disk, or when the
/// pattern itself is a remote URL, in which case it passes through verbatim
/// without touching the filesystem. Directories and non-matching patterns are
/// silently excluded.
///
/// Relative patterns are resolved under `base_dir` when one is given, and
/// admitted matches are relativized back against it; without a base dir,
/// matches are returned as discovered. Entry order follows pattern
/// declaration order, then the glob walk order within each pattern, and is
/// never re-sorted.
///
/// The first pattern that fails to compile aborts the whole expansion; no
/// partial list is ever returned.
pub fn expand_patterns(patterns: &[String], base_dir: Option<&Path>) -> Result<Vec<String>> {
  let mut entries = Vec::new();
  let mut seen = BTreeSet::new();

  for pattern in patterns {
    if is_remote(pattern) {
      if seen.insert(pattern.clone()) {
        entries.push(pattern.clone());
      }
      continue;
    }

    let resolved = match base_dir {
      Some(base) if Path::new(pattern).is_relative() => {
        base.join(pattern).to_string_lossy().into_owned()
      }
      _ => pattern.clone(),
    };

    let matches = glob::glob(&resolved).map_err(|source| Error::Pattern {
      pattern: pattern.clone(),
      source,
    })?;

    for matched in matches {
      let path = match matched {
        Ok(path) => path,
        Err(err) => {
          tracing::debug!(pattern = %pattern, error = %err, "skipping unreadable glob match");
          continue;
        }
      };
      if !path.is_file() {
        continue;
      }

      let entry = match base_dir {
        Some(base) => relativize(base, &path),
        None => path.to_string_lossy().replace('\\', "/"),
      };
      if seen.insert(entry.clone()) {
        entries.push(entry);
      }
    }
  }

  Ok(entries)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  fn touch(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
  }

  #[test]
  fn expands_relative_patterns_against_base() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("assets/app.js"), "app");
    touch(&dir.path().join("assets/site.css"), "css");
    touch(&dir.path().join("index.html"), "html");

    let entries =
      expand_patterns(&["assets/*".to_string(), "*.html".to_string()], Some(dir.path())).unwrap();
    assert_eq!(entries, vec!["assets/app.js", "assets/site.css", "index.html"]);
  }

  #[test]
  fn preserves_pattern_declaration_order() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("a/one.txt"), "1");
    touch(&dir.path().join("b/two.txt"), "2");

    let entries =
      expand_patterns(&["b/*".to_string(), "a/*".to_string()], Some(dir.path())).unwrap();
    assert_eq!(entries, vec!["b/two.txt", "a/one.txt"]);
  }

  #[test]
  fn excludes_directories_and_misses() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("assets/img")).unwrap();
    touch(&dir.path().join("assets/app.js"), "app");

    let entries =
      expand_patterns(&["assets/*".to_string(), "missing/*".to_string()], Some(dir.path()))
        .unwrap();
    assert_eq!(entries, vec!["assets/app.js"]);
  }

  #[test]
  fn passes_remote_patterns_through() {
    let dir = tempdir().unwrap();
    let entries = expand_patterns(
      &["http://cdn.example.com/x.png".to_string()],
      Some(dir.path()),
    )
    .unwrap();
    assert_eq!(entries, vec!["http://cdn.example.com/x.png"]);
  }

  #[test]
  fn deduplicates_across_patterns() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("app.js"), "app");

    let entries =
      expand_patterns(&["*.js".to_string(), "app.js".to_string()], Some(dir.path())).unwrap();
    assert_eq!(entries, vec!["app.js"]);
  }

  #[test]
  fn rejects_malformed_patterns() {
    let dir = tempdir().unwrap();
    let result = expand_patterns(&["a/***".to_string()], Some(dir.path()));
    assert!(matches!(result, Err(Error::Pattern { .. })));
  }
}
