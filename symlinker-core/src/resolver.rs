//! # Destination Resolution
//!
//! Turns the configured destination and the active environments into the
//! concrete path where the project link lives.

use std::path::{MAIN_SEPARATOR, PathBuf, is_separator};

use tracing::debug;

use crate::config::DestinationConfig;
use crate::environment::{DEFAULT_ENVIRONMENT, RuntimeEnvironmentSet};

/// A resolved link location and how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDestination {
  /// Full path of the link: destination directory plus project folder name.
  pub path: PathBuf,
  /// Mapping key the directory came from; `None` for a single destination.
  pub environment: Option<String>,
  /// Whether no active environment matched and the fallback entry was used.
  pub fallback: bool,
}

/// Compute the link path for `project_name` under the configured destination.
///
/// See [`resolve_entry`] for how an environment mapping is resolved.
pub fn resolve(destination: &DestinationConfig, project_name: &str, environments: &RuntimeEnvironmentSet) -> PathBuf {
  resolve_entry(destination, project_name, environments).path
}

/// Resolve the destination and report which entry was used.
///
/// For a mapping, the first key (in configuration order) that is an active
/// environment wins. When none is active the `default` entry is used, or the
/// first entry if there is no `default`. Resolution never fails.
pub fn resolve_entry(
  destination: &DestinationConfig,
  project_name: &str,
  environments: &RuntimeEnvironmentSet,
) -> ResolvedDestination {
  match destination {
    DestinationConfig::Single(directory) => ResolvedDestination {
      path: link_path(directory, project_name),
      environment: None,
      fallback: false,
    },
    DestinationConfig::ByEnvironment(destinations) => {
      let matching = destinations.iter().find(|(key, _)| environments.contains(key));

      let fallback = destinations
        .get(DEFAULT_ENVIRONMENT)
        .map(|directory| (DEFAULT_ENVIRONMENT, directory))
        .or_else(|| destinations.iter().next());

      let (selected, is_fallback) = match matching {
        Some(entry) => (Some(entry), false),
        None => (fallback, true),
      };

      debug!(
        "Resolved destination entry {:?} for environments {:?} (fallback: {})",
        selected.map(|(key, _)| key),
        environments.names(),
        is_fallback
      );

      // An empty mapping is rejected by validation; resolve it like an empty
      // directory rather than failing here.
      let (environment, directory) = selected.unwrap_or(("", ""));

      ResolvedDestination {
        path: link_path(directory, project_name),
        environment: selected.map(|_| environment.to_string()),
        fallback: is_fallback,
      }
    }
  }
}

fn link_path(directory: &str, project_name: &str) -> PathBuf {
  let base = directory.trim_end_matches(is_separator);
  PathBuf::from(format!("{base}{MAIN_SEPARATOR}{project_name}"))
}
