//! Render manifests to the canonical AppCache text layout and parse them back.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};
use crate::models::{Manifest, ManifestVersion, Revision};

const HEADER: &str = "CACHE MANIFEST";

#[derive(Clone, Copy)]
enum Section {
  Cache,
  Network,
  Fallback,
  Settings,
}

/// Render a manifest to the canonical text layout.
///
/// The layout is one declaration per line: the fixed `CACHE MANIFEST` header,
/// a comment carrying the revision and generation timestamp, then the
/// `CACHE:`, `NETWORK:`, `FALLBACK:` and `SETTINGS:` sections in that fixed
/// order. Section headers are emitted even when a section is empty, which
/// keeps the output trivially parseable.
pub fn render(manifest: &Manifest) -> String {
  let mut out = String::new();
  out.push_str(HEADER);
  out.push('\n');
  out.push_str(&format!(
    "# rev:{} date:{}\n",
    manifest.version.revision,
    manifest.version.date.to_rfc3339_opts(SecondsFormat::Secs, true)
  ));

  let sections = [
    ("CACHE:", &manifest.cache),
    ("NETWORK:", &manifest.network),
    ("FALLBACK:", &manifest.fallback),
    ("SETTINGS:", &manifest.settings),
  ];
  for (name, entries) in sections {
    out.push('\n');
    out.push_str(name);
    out.push('\n');
    for entry in entries {
      out.push_str(entry);
      out.push('\n');
    }
  }
  out
}

/// Write the rendered manifest to `path`.
///
/// A failed write is an expected, recoverable outcome: the result is returned
/// to the caller, which decides whether the wider run aborts.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> std::io::Result<()> {
  fs::write(path, render(manifest))
}

/// Read and parse a manifest file.
pub fn read_manifest(path: &Path) -> Result<Manifest> {
  let content = fs::read_to_string(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })?;
  parse(&content)
}

/// Parse the canonical text layout back into a manifest value.
///
/// The header line is required. `# ` comment lines may appear anywhere and
/// are scanned for `rev:` and `date:` tokens, splitting each token on its
/// first colon so RFC 3339 timestamps survive intact. Blank lines, CRLF line
/// endings and omitted sections are tolerated; entry lines before the first
/// section header belong to the CACHE section.
pub fn parse(text: &str) -> Result<Manifest> {
  let mut lines = text.lines().map(|line| line.trim_end_matches('\r'));
  match lines.next() {
    Some(line) if line.trim_end() == HEADER => {}
    other => {
      return Err(Error::Manifest(format!(
        "expected '{HEADER}' header, found {other:?}"
      )));
    }
  }

  let mut revision = Revision::default();
  let mut date: Option<DateTime<Utc>> = None;
  let mut section = Section::Cache;
  let mut cache = Vec::new();
  let mut network = Vec::new();
  let mut fallback = Vec::new();
  let mut settings = Vec::new();

  for line in lines {
    if line.trim().is_empty() {
      continue;
    }
    if let Some(comment) = line.strip_prefix('#') {
      for token in comment.split_whitespace() {
        match token.split_once(':') {
          Some(("rev", value)) => revision = Revision::parse(value),
          Some(("date", value)) => {
            let parsed = DateTime::parse_from_rfc3339(value).map_err(|err| {
              Error::Manifest(format!("unparsable date '{value}': {err}"))
            })?;
            date = Some(parsed.with_timezone(&Utc));
          }
          _ => {}
        }
      }
      continue;
    }

    match line {
      "CACHE:" => section = Section::Cache,
      "NETWORK:" => section = Section::Network,
      "FALLBACK:" => section = Section::Fallback,
      "SETTINGS:" => section = Section::Settings,
      entry => match section {
        Section::Cache => cache.push(entry.to_string()),
        Section::Network => network.push(entry.to_string()),
        Section::Fallback => fallback.push(entry.to_string()),
        Section::Settings => settings.push(entry.to_string()),
      },
    }
  }

  let date =
    date.ok_or_else(|| Error::Manifest("missing date token in header comment".to_string()))?;

  Ok(Manifest {
    version: ManifestVersion { revision, date },
    cache,
    network,
    fallback,
    settings,
  })
}
