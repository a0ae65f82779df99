#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod digest;
pub mod error;
pub mod expand;
pub mod format;
pub mod models;
pub mod paths;

pub use builder::assemble;
pub use config::{CacheSource, CacheTask, PatternList, TaskOptions, REVISION_SEQ_DATE};
pub use error::{Error, Result};
pub use models::{Manifest, ManifestVersion, Revision};
