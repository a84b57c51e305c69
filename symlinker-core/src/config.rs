//! # Configuration
//!
//! The extension configuration as read from YAML ([`RawConfig`]) and the
//! validated form ([`Config`]) the symlink manager runs with.
//!
//! ```yaml
//! mode: plugin
//! destination:
//!   default: /var/www/wordpress/wp-content/plugins
//!   docker: /srv/wordpress/wp-content/plugins
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::fs::Filesystem;

/// Default configuration file name, looked up in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "symlinker.yml";

/// What kind of WordPress component the project is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
  Plugin,
  Theme,
}

impl Mode {
  /// Every supported mode, in the order they are reported.
  pub const ALL: [Mode; 2] = [Mode::Plugin, Mode::Theme];

  pub const fn as_str(self) -> &'static str {
    match self {
      Mode::Plugin => "plugin",
      Mode::Theme => "theme",
    }
  }

  /// Parse a configured mode name; unknown names yield `None`.
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|mode| mode.as_str() == name)
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// `mode` as written in the configuration: a single name or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ModeSetting {
  One(String),
  Many(Vec<String>),
}

impl ModeSetting {
  fn names(&self) -> Vec<&str> {
    match self {
      ModeSetting::One(name) => vec![name.as_str()],
      ModeSetting::Many(names) => names.iter().map(String::as_str).collect(),
    }
  }
}

/// Environment name to destination directory, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentDestinations {
  entries: Vec<(String, String)>,
}

impl EnvironmentDestinations {
  /// Build a mapping from `(environment, directory)` pairs. A repeated
  /// environment keeps its first position and its last value.
  pub fn new<I, K, V>(entries: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let mut destinations = Self::default();
    for (environment, directory) in entries {
      destinations.insert(environment.into(), directory.into());
    }
    destinations
  }

  fn insert(&mut self, environment: String, directory: String) {
    match self.entries.iter_mut().find(|(key, _)| *key == environment) {
      Some(entry) => entry.1 = directory,
      None => self.entries.push((environment, directory)),
    }
  }

  /// Directory configured for `environment`, if any.
  pub fn get(&self, environment: &str) -> Option<&str> {
    self
      .entries
      .iter()
      .find(|(key, _)| key == environment)
      .map(|(_, directory)| directory.as_str())
  }

  /// Entries in configuration order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Where the project gets linked: one directory for every run, or one per
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationConfig {
  Single(String),
  ByEnvironment(EnvironmentDestinations),
}

impl DestinationConfig {
  /// Every directory reachable through this destination, in configuration
  /// order.
  pub fn directories(&self) -> Vec<&str> {
    match self {
      DestinationConfig::Single(directory) => vec![directory.as_str()],
      DestinationConfig::ByEnvironment(destinations) => destinations.iter().map(|(_, directory)| directory).collect(),
    }
  }
}

impl<'de> Deserialize<'de> for DestinationConfig {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    struct DestinationVisitor;

    impl<'de> Visitor<'de> for DestinationVisitor {
      type Value = DestinationConfig;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a directory path or a mapping of environment names to directory paths")
      }

      fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(DestinationConfig::Single(value.to_string()))
      }

      fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(DestinationConfig::Single(value))
      }

      fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
      where
        A: MapAccess<'de>,
      {
        let mut destinations = EnvironmentDestinations::default();
        while let Some((environment, directory)) = map.next_entry::<String, String>()? {
          destinations.insert(environment, directory);
        }
        Ok(DestinationConfig::ByEnvironment(destinations))
      }
    }

    deserializer.deserialize_any(DestinationVisitor)
  }
}

/// Configuration exactly as written; nothing is checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawConfig {
  #[serde(default)]
  pub mode: Option<ModeSetting>,
  #[serde(default)]
  pub destination: Option<DestinationConfig>,
}

impl RawConfig {
  /// Load configuration from a YAML file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Parse configuration from in-memory YAML.
  pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(content)
  }

  /// Check required keys and destination directories.
  ///
  /// Stops at the first problem. Every destination directory, including ones
  /// for environments not active in this run, must exist and be writable.
  pub fn validate<F: Filesystem + ?Sized>(&self, filesystem: &F) -> Result<Config, ConfigError> {
    let mode = self.mode.as_ref().ok_or(ConfigError::MissingParameter("mode"))?;

    let modes: Vec<Mode> = mode.names().into_iter().filter_map(Mode::from_name).collect();
    if modes.is_empty() {
      return Err(ConfigError::InvalidMode {
        value: mode.names().join(", "),
        allowed: Mode::ALL.map(Mode::as_str).join(", "),
      });
    }

    let destination = self
      .destination
      .as_ref()
      .ok_or(ConfigError::MissingParameter("destination"))?;

    if let DestinationConfig::ByEnvironment(destinations) = destination
      && destinations.is_empty()
    {
      return Err(ConfigError::EmptyDestinationMap);
    }

    for directory in destination.directories() {
      let path = Path::new(directory);
      if !(filesystem.is_dir(path) && filesystem.is_writable(path)) {
        return Err(ConfigError::DestinationNotWritableDirectory(PathBuf::from(directory)));
      }
    }

    Ok(Config {
      modes,
      destination: destination.clone(),
    })
  }
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  modes: Vec<Mode>,
  destination: DestinationConfig,
}

impl Config {
  /// The first supported mode that was configured.
  pub fn mode(&self) -> Mode {
    self.modes.first().copied().unwrap_or(Mode::Plugin)
  }

  /// Every supported mode that was configured.
  pub fn modes(&self) -> &[Mode] {
    &self.modes
  }

  pub fn destination(&self) -> &DestinationConfig {
    &self.destination
  }
}
