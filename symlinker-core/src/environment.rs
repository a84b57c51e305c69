//! # Runtime Environments
//!
//! Parses the comma-separated environment selection the test harness passes
//! to each lifecycle hook.

/// Environment name used when the harness does not select any.
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Settings handed to each lifecycle hook by the test harness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteSettings {
  /// Raw comma-separated list of active environments, e.g. `"ci, docker"`.
  pub current_environment: Option<String>,
}

impl SuiteSettings {
  /// Settings for a run with the given raw environment string.
  pub fn with_environment(current_environment: impl Into<String>) -> Self {
    Self {
      current_environment: Some(current_environment.into()),
    }
  }

  /// The environments active for this run.
  pub fn environments(&self) -> RuntimeEnvironmentSet {
    RuntimeEnvironmentSet::parse(self.current_environment.as_deref())
  }
}

/// Ordered set of environment names active for the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnvironmentSet {
  names: Vec<String>,
}

impl RuntimeEnvironmentSet {
  /// Parse a comma-separated environment string.
  ///
  /// Whitespace around commas is ignored, as are empty names and repeats. An
  /// unset or blank string selects only [`DEFAULT_ENVIRONMENT`].
  pub fn parse(raw: Option<&str>) -> Self {
    let mut names: Vec<String> = Vec::new();

    for name in raw.unwrap_or_default().split(',').map(str::trim) {
      if !name.is_empty() && !names.iter().any(|existing| existing == name) {
        names.push(name.to_string());
      }
    }

    if names.is_empty() {
      names.push(DEFAULT_ENVIRONMENT.to_string());
    }

    Self { names }
  }

  /// Whether `name` is one of the active environments.
  pub fn contains(&self, name: &str) -> bool {
    self.names.iter().any(|active| active == name)
  }

  /// Active environment names in the order they were given.
  pub fn names(&self) -> &[String] {
    &self.names
  }
}

impl Default for RuntimeEnvironmentSet {
  fn default() -> Self {
    Self::parse(None)
  }
}
