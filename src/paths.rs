//! Path and URL helpers shared by expansion, hashing and assembly.

use std::env;
use std::path::{Component, Path, PathBuf};

use regex::Regex;

fn remote_prefix() -> &'static Regex {
  use std::sync::OnceLock;

  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"(?i)^(?:https?:)?//").expect("invalid remote prefix regex"))
}

/// Determine whether a manifest entry refers to a remote resource.
///
/// Remote entries begin with `http://`, `https://` or a scheme-relative `//`,
/// case-insensitively. They are admitted into expansion results without
/// existing on disk and are never read byte-wise while hashing.
pub fn is_remote(value: &str) -> bool {
  remote_prefix().is_match(value)
}

/// Resolve a path against the current working directory when it is relative.
///
/// [`relativize`] is purely lexical, so a relative path compared against an
/// absolute base would never share a prefix with it. Destination paths are
/// absolutized through here first; when the working directory cannot be
/// determined the path is returned as given.
pub fn absolutize(path: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    env::current_dir()
      .map(|cwd| cwd.join(path))
      .unwrap_or_else(|_| path.to_path_buf())
  }
}

/// Lexically normalise a path, resolving `.` and `..` segments.
///
/// Works on the path spelling alone and never touches the filesystem, so
/// non-existent paths normalise the same way as real ones. Leading `..`
/// segments that cannot be resolved are preserved.
pub fn normalize(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match normalized.components().next_back() {
        Some(Component::Normal(_)) => {
          normalized.pop();
        }
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => normalized.push(Component::ParentDir),
      },
      other => normalized.push(other),
    }
  }
  normalized
}

/// Relative path from `base` to `target`, rendered with forward slashes.
///
/// Both inputs are normalised first, so equal-but-differently-spelled paths
/// (trailing slashes, interior `.` segments) relativise identically. The
/// result is the exact string form compared against ignore-set entries.
pub fn relativize(base: &Path, target: &Path) -> String {
  let base = normalize(base);
  let target = normalize(target);

  let base_components: Vec<Component> = base.components().collect();
  let target_components: Vec<Component> = target.components().collect();

  let common = base_components
    .iter()
    .zip(target_components.iter())
    .take_while(|(left, right)| left == right)
    .count();

  let mut parts: Vec<String> = Vec::new();
  for component in &base_components[common..] {
    if matches!(component, Component::Normal(_) | Component::ParentDir) {
      parts.push("..".to_string());
    }
  }
  for component in &target_components[common..] {
    if let Component::Normal(segment) = component {
      parts.push(segment.to_string_lossy().into_owned());
    }
  }

  parts.join("/")
}

/// Join URL fragments with single slashes.
///
/// Trailing slash characters are stripped from every part before joining, so
/// a base URL may be spelled with or without a trailing slash.
pub fn join_url<I, S>(parts: I) -> String
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  parts
    .into_iter()
    .map(|part| part.as_ref().trim_end_matches('/').to_string())
    .collect::<Vec<_>>()
    .join("/")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detects_remote_prefixes() {
    assert!(is_remote("http://example.com/app.js"));
    assert!(is_remote("HTTPS://example.com/app.js"));
    assert!(is_remote("//cdn.example.com/app.js"));
  }

  #[test]
  fn keeps_local_paths() {
    assert!(!is_remote("assets/app.js"));
    assert!(!is_remote("/assets/app.js"));
    assert!(!is_remote("httpdocs/index.html"));
  }

  #[test]
  fn absolutize_resolves_relative_paths() {
    let resolved = absolutize(Path::new("site.appcache"));
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("site.appcache"));
  }

  #[test]
  fn absolutize_keeps_absolute_paths() {
    assert_eq!(
      absolutize(Path::new("/srv/site.appcache")),
      PathBuf::from("/srv/site.appcache")
    );
  }

  #[test]
  fn normalizes_dot_segments() {
    assert_eq!(normalize(Path::new("a/./b/../c")), PathBuf::from("a/c"));
    assert_eq!(normalize(Path::new("/a/../../b")), PathBuf::from("/b"));
    assert_eq!(normalize(Path::new("../a")), PathBuf::from("../a"));
  }

  #[test]
  fn relativizes_within_base() {
    assert_eq!(
      relativize(Path::new("/srv/site"), Path::new("/srv/site/assets/app.js")),
      "assets/app.js"
    );
  }

  #[test]
  fn relativizes_outside_base() {
    assert_eq!(
      relativize(Path::new("/srv/site/dist"), Path::new("/srv/site/manifest.appcache")),
      "../manifest.appcache"
    );
  }

  #[test]
  fn relativize_is_stable_for_equivalent_spellings() {
    let plain = relativize(Path::new("/srv/site"), Path::new("/srv/site/index.html"));
    let spelled = relativize(Path::new("/srv/site/"), Path::new("/srv/./site/index.html"));
    assert_eq!(plain, spelled);
  }

  #[test]
  fn joins_url_parts_with_single_slashes() {
    assert_eq!(
      join_url(["http://cdn.example.com/", "assets/app.js"]),
      "http://cdn.example.com/assets/app.js"
    );
    assert_eq!(join_url(["/static", "site.css"]), "/static/site.css");
  }
}
