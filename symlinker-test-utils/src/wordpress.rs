//! Temporary WordPress installations for testing
//!
//! Each guard owns a temporary directory holding a minimal WordPress layout
//! and a plugin project next to it:
//!
//! ```text
//! <tmp>/wordpress/wp-content/plugins/
//! <tmp>/wordpress/wp-content/themes/
//! <tmp>/projects/<name>/plugin.php
//! <tmp>/projects/<name>/symlinker.yml   (written on demand)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Folder name of the project created by [`WordPressInstallGuard::new`].
pub const DEFAULT_PROJECT_NAME: &str = "my-plugin";

/// A WordPress installation and project that are removed when dropped
pub struct WordPressInstallGuard {
  /// The temporary directory holding everything
  pub temp_dir: TempDir,
  project_name: String,
}

impl Default for WordPressInstallGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl WordPressInstallGuard {
  /// Create an installation with a project named [`DEFAULT_PROJECT_NAME`]
  pub fn new() -> Self {
    Self::with_project(DEFAULT_PROJECT_NAME).expect("Failed to create WordPress test installation")
  }

  /// Create an installation with a project folder called `project_name`
  pub fn with_project(project_name: &str) -> anyhow::Result<Self> {
    let temp_dir = TempDir::new()?;
    let guard = Self {
      temp_dir,
      project_name: project_name.to_string(),
    };

    fs::create_dir_all(guard.plugins_dir())
      .map_err(|e| anyhow::anyhow!("Failed to create plugins directory: {e}"))?;
    fs::create_dir_all(guard.themes_dir()).map_err(|e| anyhow::anyhow!("Failed to create themes directory: {e}"))?;
    fs::create_dir_all(guard.project_root())
      .map_err(|e| anyhow::anyhow!("Failed to create project directory: {e}"))?;
    fs::write(
      guard.project_root().join("plugin.php"),
      "<?php\n/*\nPlugin Name: Test Plugin\n*/\n",
    )
    .map_err(|e| anyhow::anyhow!("Failed to write plugin file: {e}"))?;

    Ok(guard)
  }

  /// Root of the temporary directory
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }

  /// WordPress installation root
  pub fn wordpress_dir(&self) -> PathBuf {
    self.path().join("wordpress")
  }

  /// `wp-content/plugins` directory of the installation
  pub fn plugins_dir(&self) -> PathBuf {
    self.wordpress_dir().join("wp-content").join("plugins")
  }

  /// `wp-content/themes` directory of the installation
  pub fn themes_dir(&self) -> PathBuf {
    self.wordpress_dir().join("wp-content").join("themes")
  }

  /// Plugins directory as a string, ready for a YAML config
  pub fn plugins_dir_str(&self) -> String {
    self.plugins_dir().display().to_string()
  }

  /// Themes directory as a string, ready for a YAML config
  pub fn themes_dir_str(&self) -> String {
    self.themes_dir().display().to_string()
  }

  /// Project folder name
  pub fn project_name(&self) -> &str {
    &self.project_name
  }

  /// Directory of the project under test
  pub fn project_root(&self) -> PathBuf {
    self.path().join("projects").join(&self.project_name)
  }

  /// Where the project link lands in the plugins directory
  pub fn linked_path(&self) -> PathBuf {
    self.plugins_dir().join(&self.project_name)
  }

  /// Write `symlinker.yml` into the project root and return its path
  pub fn write_config(&self, content: &str) -> PathBuf {
    let path = self.project_root().join("symlinker.yml");
    fs::write(&path, content).expect("Failed to write config file");
    path
  }

  /// Write a config linking the project into the plugins directory
  pub fn write_plugin_config(&self) -> PathBuf {
    self.write_config(&format!("mode: plugin\ndestination: {}\n", self.plugins_dir_str()))
  }
}
