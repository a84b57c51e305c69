//! Plugin-facing helpers for discovering the invocation context.
//!
//! The test harness passes context to the plugin through environment
//! variables. When those variables are missing (for example, when the plugin
//! is run by hand during development) the context falls back to the current
//! directory and the default environment.

use std::env;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::environment::SuiteSettings;
use crate::output::ColorMode;

/// Project root directory.
pub const ENV_PROJECT_ROOT: &str = "SYMLINKER_PROJECT_ROOT";
/// Configuration file path.
pub const ENV_CONFIG: &str = "SYMLINKER_CONFIG";
/// Comma-separated list of active environments.
pub const ENV_CURRENT_ENVIRONMENT: &str = "SYMLINKER_CURRENT_ENVIRONMENT";
/// Log verbosity, 0 to 3.
pub const ENV_VERBOSITY: &str = "SYMLINKER_VERBOSITY";
/// `yes`, `no` or `auto`.
pub const ENV_COLORS: &str = "SYMLINKER_COLORS";

/// Resolved context for a plugin invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginContext {
  /// Directory of the plugin or theme under test.
  pub project_root: PathBuf,
  /// Configuration file to load.
  pub config_path: PathBuf,
  /// Settings handed to the lifecycle hooks.
  pub settings: SuiteSettings,
  /// Verbosity level propagated from the harness.
  pub verbosity: u8,
  /// Color preference propagated from the harness.
  pub colors: ColorMode,
}

impl PluginContext {
  /// Load the plugin context from environment variables, falling back to the
  /// current directory for the project root.
  pub fn discover() -> std::io::Result<Self> {
    let cwd = env::current_dir()?;
    Ok(Self::from_lookup(cwd, |key| env::var(key).ok()))
  }

  /// Build the context from `lookup`, using `cwd` when no project root is
  /// provided. Empty values count as unset, and a relative project root is
  /// taken relative to `cwd`.
  pub fn from_lookup<L>(cwd: PathBuf, lookup: L) -> Self
  where
    L: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let project_root = match get(ENV_PROJECT_ROOT).map(PathBuf::from) {
      Some(root) if root.is_relative() => cwd.join(root),
      Some(root) => root,
      None => cwd,
    };
    let config_path = get(ENV_CONFIG)
      .map(PathBuf::from)
      .unwrap_or_else(|| project_root.join(DEFAULT_CONFIG_FILE));

    let settings = SuiteSettings {
      current_environment: get(ENV_CURRENT_ENVIRONMENT),
    };

    let verbosity = get(ENV_VERBOSITY)
      .and_then(|value| value.trim().parse::<u8>().ok())
      .map(|level| level.min(3))
      .unwrap_or(0);

    let colors = get(ENV_COLORS)
      .map(|value| ColorMode::from_env_value(&value))
      .unwrap_or_default();

    Self {
      project_root,
      config_path,
      settings,
      verbosity,
      colors,
    }
  }
}
