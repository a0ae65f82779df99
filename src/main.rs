//! Command line front end generating AppCache manifests from task descriptors.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use appcache_gen::{assemble, format, CacheTask};

/// Generate an HTML5 AppCache manifest from a JSON task descriptor.
#[derive(Debug, Parser)]
#[command(name = "appcache-gen", version, about)]
struct Args {
  /// Path to the JSON task descriptor.
  task: PathBuf,

  /// Override the base path from the descriptor options.
  #[arg(long)]
  base_path: Option<PathBuf>,

  /// Override the revision strategy from the descriptor options.
  #[arg(long)]
  revision: Option<String>,

  /// Increase log verbosity (repeatable).
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn main() -> ExitCode {
  let args = Args::parse();
  init_logging(args.verbose);

  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      tracing::error!("{err:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(args: &Args) -> anyhow::Result<()> {
  let task = CacheTask::from_path(&args.task)
    .with_context(|| format!("failed to load task descriptor {}", args.task.display()))?;

  let mut options = task.options.clone();
  if let Some(base_path) = &args.base_path {
    options.base_path = base_path.clone();
  }
  if let Some(revision) = &args.revision {
    options.revision = Some(revision.clone());
  }

  let manifest = assemble(&task, &options)?;

  if let Err(err) = format::write_manifest(&task.dest, &manifest) {
    anyhow::bail!("AppCache manifest creation failed for {}: {err}", task.dest.display());
  }

  tracing::info!(
    dest = %task.dest.display(),
    entries = manifest.cache.len(),
    revision = %manifest.version.revision,
    "AppCache manifest created"
  );
  Ok(())
}

fn init_logging(verbosity: u8) {
  let default_filter = match verbosity {
    0 => "info",
    1 => "debug",
    _ => "trace",
  };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .init();
}
