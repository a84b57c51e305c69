//! # Symlink Manager
//!
//! Links the project folder into the WordPress installation when a suite
//! starts and removes the link when it finishes.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{Config, RawConfig};
use crate::environment::SuiteSettings;
use crate::error::{ConfigError, LifecycleError};
use crate::fs::{Filesystem, OsFilesystem};
use crate::output::{print_info, print_success, print_warning};
use crate::resolver::{ResolvedDestination, resolve_entry};

/// What the suite-start hook did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
  /// A new link was created at this path.
  Linked(PathBuf),
  /// A link pointing somewhere else was swapped for a new link at this path.
  Replaced(PathBuf),
  /// The project link or a real directory already exists at this path;
  /// nothing was changed.
  AlreadyPresent(PathBuf),
}

/// What the suite-end hook did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlinkOutcome {
  /// The link at this path was removed.
  Unlinked(PathBuf),
  /// Nothing exists at this path; nothing was changed.
  NotPresent(PathBuf),
  /// Removal failed and the path needs manual cleanup.
  Failed(PathBuf),
}

/// The two hooks the test harness runs around a suite.
pub trait SuiteLifecycle {
  /// Runs before the suite. Errors abort the run.
  fn on_suite_init(&self, settings: &SuiteSettings) -> Result<LinkOutcome, LifecycleError>;

  /// Runs after the suite. Never fails the run.
  fn on_suite_after(&self, settings: &SuiteSettings) -> UnlinkOutcome;
}

/// Manages the project link for one test run.
#[derive(Debug)]
pub struct SymlinkManager<F = OsFilesystem> {
  config: Config,
  project_root: PathBuf,
  project_name: String,
  filesystem: F,
}

impl SymlinkManager<OsFilesystem> {
  /// Validate `raw` against the real filesystem and build a manager for
  /// `project_root`.
  pub fn new(raw: &RawConfig, project_root: &Path) -> Result<Self, ConfigError> {
    Self::initialize(raw, project_root, OsFilesystem)
  }
}

impl<F: Filesystem> SymlinkManager<F> {
  /// Validate `raw` and build a manager for `project_root`.
  ///
  /// Nothing on disk changes until a hook runs.
  pub fn initialize(raw: &RawConfig, project_root: &Path, filesystem: F) -> Result<Self, ConfigError> {
    let config = raw.validate(&filesystem)?;
    let (project_root, project_name) = split_project_root(project_root)?;

    debug!(
      "Initialized {} link for {} ({})",
      config.mode(),
      project_name,
      project_root.display()
    );

    Ok(Self {
      config,
      project_root,
      project_name,
      filesystem,
    })
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Project root with trailing separators removed.
  pub fn project_root(&self) -> &Path {
    &self.project_root
  }

  /// Folder name the link is created under.
  pub fn project_name(&self) -> &str {
    &self.project_name
  }

  /// Where the link lives for the environments in `settings`.
  pub fn destination_for(&self, settings: &SuiteSettings) -> PathBuf {
    self.resolve(settings).path
  }

  /// Like [`Self::destination_for`], also reporting which configured entry
  /// was used.
  pub fn resolve(&self, settings: &SuiteSettings) -> ResolvedDestination {
    resolve_entry(
      self.config.destination(),
      &self.project_name,
      &settings.environments(),
    )
  }
}

impl<F: Filesystem> SuiteLifecycle for SymlinkManager<F> {
  fn on_suite_init(&self, settings: &SuiteSettings) -> Result<LinkOutcome, LifecycleError> {
    let destination = self.destination_for(settings);
    let mut replaced = false;

    if self.filesystem.exists(&destination) {
      match self.filesystem.read_link(&destination) {
        Some(target) if target != self.project_root => {
          info!(
            "Replacing stale link {} -> {}",
            destination.display(),
            target.display()
          );
          if !self.filesystem.remove_tree(&destination) {
            return Err(LifecycleError::StaleLink { destination, target });
          }
          replaced = true;
        }
        _ => {
          debug!("{} already exists, leaving it in place", destination.display());
          return Ok(LinkOutcome::AlreadyPresent(destination));
        }
      }
    }

    self
      .filesystem
      .create_symlink(&self.project_root, &destination, true)
      .map_err(|source| LifecycleError::SymlinkCreation {
        destination: destination.clone(),
        source,
      })?;

    info!(
      "Linked {} -> {}",
      destination.display(),
      self.project_root.display()
    );
    print_info(&format!(
      "Symbolically linked {} folder [{}]",
      self.config.mode(),
      destination.display()
    ));

    if replaced {
      Ok(LinkOutcome::Replaced(destination))
    } else {
      Ok(LinkOutcome::Linked(destination))
    }
  }

  fn on_suite_after(&self, settings: &SuiteSettings) -> UnlinkOutcome {
    let destination = self.destination_for(settings);

    if !self.filesystem.exists(&destination) {
      debug!("{} does not exist, nothing to unlink", destination.display());
      return UnlinkOutcome::NotPresent(destination);
    }

    if self.filesystem.remove_tree(&destination) {
      info!("Unlinked {}", destination.display());
      print_success(&format!(
        "Unlinked {} folder [{}]",
        self.config.mode(),
        destination.display()
      ));
      UnlinkOutcome::Unlinked(destination)
    } else {
      warn!("Failed to unlink {}", destination.display());
      print_warning(&format!(
        "Could not unlink folder [{}], manual removal is required.",
        destination.display()
      ));
      UnlinkOutcome::Failed(destination)
    }
  }
}

/// Strip trailing separators from `root` and take its last component as the
/// link name.
fn split_project_root(root: &Path) -> Result<(PathBuf, String), ConfigError> {
  let trimmed_root: PathBuf = root.components().collect();

  let name = trimmed_root
    .file_name()
    .and_then(|name| name.to_str())
    .filter(|name| !name.is_empty())
    .ok_or_else(|| ConfigError::InvalidProjectRoot(root.to_path_buf()))?
    .to_string();

  Ok((trimmed_root, name))
}

#[cfg(test)]
mod tests {
  use std::io;

  use super::*;
  use crate::config::{DestinationConfig, EnvironmentDestinations, ModeSetting};
  use crate::fs::MockFilesystem;

  fn raw_config(destination: DestinationConfig) -> RawConfig {
    RawConfig {
      mode: Some(ModeSetting::One("plugin".to_string())),
      destination: Some(destination),
    }
  }

  fn accepting_filesystem() -> MockFilesystem {
    let mut fs = MockFilesystem::new();
    fs.expect_is_dir().return_const(true);
    fs.expect_is_writable().return_const(true);
    fs
  }

  fn single(directory: &str) -> DestinationConfig {
    DestinationConfig::Single(directory.to_string())
  }

  #[test]
  fn test_project_root_is_trimmed() {
    let (root, name) = split_project_root(Path::new("/proj/my-plugin//")).unwrap();
    assert_eq!(root, PathBuf::from("/proj/my-plugin"));
    assert_eq!(name, "my-plugin");
  }

  #[test]
  fn test_filesystem_root_cannot_be_linked() {
    assert!(matches!(
      split_project_root(Path::new("/")),
      Err(ConfigError::InvalidProjectRoot(_))
    ));
  }

  #[cfg(unix)]
  #[test]
  fn test_non_utf8_project_name_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = Path::new(OsStr::from_bytes(b"/proj/my-\xffplugin"));
    assert!(matches!(
      split_project_root(root),
      Err(ConfigError::InvalidProjectRoot(path)) if path.as_path() == root
    ));
  }

  #[test]
  fn test_initialize_rejects_invalid_config() {
    let mut fs = MockFilesystem::new();
    fs.expect_is_dir().return_const(false);
    fs.expect_is_writable().return_const(false);

    let err = SymlinkManager::initialize(
      &raw_config(single("/tmp/nonexistent")),
      Path::new("/proj/my-plugin"),
      fs,
    )
    .unwrap_err();
    assert!(err.to_string().contains("/tmp/nonexistent"));
  }

  #[test]
  fn test_init_creates_link_when_absent() {
    let mut fs = accepting_filesystem();
    let link = PathBuf::from("/var/www/wp/wp-content/plugins/my-plugin");
    fs.expect_exists()
      .withf(|path| path == Path::new("/var/www/wp/wp-content/plugins/my-plugin"))
      .times(1)
      .return_const(false);
    fs.expect_create_symlink()
      .withf(|target, link, directory| {
        target == Path::new("/proj/my-plugin")
          && link == Path::new("/var/www/wp/wp-content/plugins/my-plugin")
          && *directory
      })
      .times(1)
      .returning(|_, _, _| Ok(()));

    let manager = SymlinkManager::initialize(
      &raw_config(single("/var/www/wp/wp-content/plugins")),
      Path::new("/proj/my-plugin"),
      fs,
    )
    .unwrap();

    let outcome = manager.on_suite_init(&SuiteSettings::with_environment("default")).unwrap();
    assert_eq!(outcome, LinkOutcome::Linked(link));
  }

  #[test]
  fn test_init_is_noop_when_present() {
    let mut fs = accepting_filesystem();
    fs.expect_exists().return_const(true);
    fs.expect_read_link().return_const(Some(PathBuf::from("/proj/my-plugin")));
    fs.expect_create_symlink().never();
    fs.expect_remove_tree().never();

    let manager =
      SymlinkManager::initialize(&raw_config(single("/plugins")), Path::new("/proj/my-plugin"), fs).unwrap();

    let outcome = manager.on_suite_init(&SuiteSettings::default()).unwrap();
    assert_eq!(outcome, LinkOutcome::AlreadyPresent(PathBuf::from("/plugins/my-plugin")));
  }

  #[test]
  fn test_init_keeps_real_directory() {
    let mut fs = accepting_filesystem();
    fs.expect_exists().return_const(true);
    fs.expect_read_link().return_const(None::<PathBuf>);
    fs.expect_remove_tree().never();
    fs.expect_create_symlink().never();

    let manager =
      SymlinkManager::initialize(&raw_config(single("/plugins")), Path::new("/proj/my-plugin"), fs).unwrap();

    let outcome = manager.on_suite_init(&SuiteSettings::default()).unwrap();
    assert_eq!(outcome, LinkOutcome::AlreadyPresent(PathBuf::from("/plugins/my-plugin")));
  }

  #[test]
  fn test_init_replaces_link_to_other_target() {
    let mut fs = accepting_filesystem();
    fs.expect_exists().return_const(true);
    fs.expect_read_link()
      .return_const(Some(PathBuf::from("/old-checkout/my-plugin")));
    fs.expect_remove_tree()
      .withf(|path| path == Path::new("/plugins/my-plugin"))
      .times(1)
      .return_const(true);
    fs.expect_create_symlink()
      .withf(|target, link, _| target == Path::new("/proj/my-plugin") && link == Path::new("/plugins/my-plugin"))
      .times(1)
      .returning(|_, _, _| Ok(()));

    let manager =
      SymlinkManager::initialize(&raw_config(single("/plugins")), Path::new("/proj/my-plugin"), fs).unwrap();

    let outcome = manager.on_suite_init(&SuiteSettings::default()).unwrap();
    assert_eq!(outcome, LinkOutcome::Replaced(PathBuf::from("/plugins/my-plugin")));
  }

  #[test]
  fn test_init_fails_when_stale_link_stays() {
    let mut fs = accepting_filesystem();
    fs.expect_exists().return_const(true);
    fs.expect_read_link()
      .return_const(Some(PathBuf::from("/old-checkout/my-plugin")));
    fs.expect_remove_tree().return_const(false);
    fs.expect_create_symlink().never();

    let manager =
      SymlinkManager::initialize(&raw_config(single("/plugins")), Path::new("/proj/my-plugin"), fs).unwrap();

    let err = manager.on_suite_init(&SuiteSettings::default()).unwrap_err();
    assert!(matches!(err, LifecycleError::StaleLink { .. }));
    assert!(err.to_string().contains("/old-checkout/my-plugin"));
  }

  #[test]
  fn test_init_failure_names_destination() {
    let mut fs = accepting_filesystem();
    fs.expect_exists().return_const(false);
    fs.expect_create_symlink()
      .returning(|_, _, _| Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")));

    let manager =
      SymlinkManager::initialize(&raw_config(single("/plugins")), Path::new("/proj/my-plugin"), fs).unwrap();

    let err = manager.on_suite_init(&SuiteSettings::default()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("/plugins/my-plugin"));
    assert!(message.contains("permission denied"));
  }

  #[test]
  fn test_after_removes_existing_link() {
    let mut fs = accepting_filesystem();
    fs.expect_exists().return_const(true);
    fs.expect_remove_tree()
      .withf(|path| path == Path::new("/plugins/my-plugin"))
      .times(1)
      .return_const(true);

    let manager =
      SymlinkManager::initialize(&raw_config(single("/plugins")), Path::new("/proj/my-plugin"), fs).unwrap();

    assert_eq!(
      manager.on_suite_after(&SuiteSettings::default()),
      UnlinkOutcome::Unlinked(PathBuf::from("/plugins/my-plugin"))
    );
  }

  #[test]
  fn test_after_failure_is_reported_not_raised() {
    let mut fs = accepting_filesystem();
    fs.expect_exists().return_const(true);
    fs.expect_remove_tree().return_const(false);

    let manager =
      SymlinkManager::initialize(&raw_config(single("/plugins")), Path::new("/proj/my-plugin"), fs).unwrap();

    assert_eq!(
      manager.on_suite_after(&SuiteSettings::default()),
      UnlinkOutcome::Failed(PathBuf::from("/plugins/my-plugin"))
    );
  }

  #[test]
  fn test_after_is_noop_without_link() {
    let mut fs = accepting_filesystem();
    fs.expect_exists().return_const(false);
    fs.expect_remove_tree().never();

    let manager =
      SymlinkManager::initialize(&raw_config(single("/plugins")), Path::new("/proj/my-plugin"), fs).unwrap();

    assert_eq!(
      manager.on_suite_after(&SuiteSettings::default()),
      UnlinkOutcome::NotPresent(PathBuf::from("/plugins/my-plugin"))
    );
  }

  #[test]
  fn test_hooks_follow_active_environment() {
    let mut fs = accepting_filesystem();
    fs.expect_exists()
      .withf(|path| path == Path::new("/docker/plugins/my-plugin"))
      .return_const(false);
    fs.expect_create_symlink().returning(|_, _, _| Ok(()));

    let destination = DestinationConfig::ByEnvironment(EnvironmentDestinations::new([
      ("default", "/local/plugins"),
      ("docker", "/docker/plugins"),
    ]));
    let manager = SymlinkManager::initialize(&raw_config(destination), Path::new("/proj/my-plugin"), fs).unwrap();

    let outcome = manager
      .on_suite_init(&SuiteSettings::with_environment("ci, docker"))
      .unwrap();
    assert_eq!(
      outcome,
      LinkOutcome::Linked(PathBuf::from("/docker/plugins/my-plugin"))
    );
  }
}
