//! # Errors
//!
//! Error types for configuration validation and the suite lifecycle.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating the extension configuration.
///
/// Every variant is fatal: the run must not proceed to any lifecycle hook.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// A required key is absent from the configuration.
  #[error("Required configuration parameter [{0}] is missing.")]
  MissingParameter(&'static str),

  /// None of the configured modes is supported.
  #[error("[mode] value [{value}] should be one among these values: [{allowed}]")]
  InvalidMode { value: String, allowed: String },

  /// The destination was given as a mapping without any entries.
  #[error("[destination] parameter is an empty mapping; at least one environment destination is required.")]
  EmptyDestinationMap,

  /// A configured destination is not an existing, writable directory.
  #[error("[destination] parameter [{}] is not an existing and writeable directory.", .0.display())]
  DestinationNotWritableDirectory(PathBuf),

  /// The project root has no usable final path component to name the link.
  #[error("Project root [{}] has no folder name to link.", .0.display())]
  InvalidProjectRoot(PathBuf),

  /// The configuration file could not be read.
  #[error("Failed to read configuration from {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The configuration file is not valid YAML for this extension.
  #[error("Failed to parse configuration from {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },
}

/// Fatal errors raised by a lifecycle hook.
#[derive(Debug, Error)]
pub enum LifecycleError {
  /// Creating the link at suite start failed.
  #[error("Error while trying to symlink plugin or theme to destination [{}].\n\n{source}", destination.display())]
  SymlinkCreation {
    destination: PathBuf,
    #[source]
    source: io::Error,
  },

  /// A link left at the destination points elsewhere and could not be
  /// removed.
  #[error("Stale link [{}] points at [{}] and could not be removed; remove it manually.", destination.display(), target.display())]
  StaleLink { destination: PathBuf, target: PathBuf },
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Lifecycle(#[from] LifecycleError),
}

pub type Result<T> = std::result::Result<T, Error>;
