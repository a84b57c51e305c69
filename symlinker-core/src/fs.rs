//! # Filesystem Boundary
//!
//! The handful of filesystem operations the validator and the symlink manager
//! need, behind a trait so lifecycle behaviour can be tested without touching
//! a real WordPress installation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Filesystem operations used by the extension.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem {
  /// Whether any entry exists at `path`. A dangling symlink counts as an
  /// entry.
  fn exists(&self, path: &Path) -> bool;

  /// Where the symlink at `path` points, or `None` when `path` is not a
  /// symlink.
  fn read_link(&self, path: &Path) -> Option<PathBuf>;

  /// Whether `path` is a directory, following symlinks.
  fn is_dir(&self, path: &Path) -> bool;

  /// Whether the current user may write to `path`.
  fn is_writable(&self, path: &Path) -> bool;

  /// Create a symbolic link at `link` pointing at `target`.
  ///
  /// `directory` selects a directory link on platforms that distinguish
  /// between file and directory links.
  fn create_symlink(&self, target: &Path, link: &Path, directory: bool) -> io::Result<()>;

  /// Remove `path`. A symlink is removed without touching what it points at;
  /// a real directory is removed with its contents. Returns whether the
  /// removal succeeded.
  fn remove_tree(&self, path: &Path) -> bool;
}

/// [`Filesystem`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
  fn exists(&self, path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
  }

  fn read_link(&self, path: &Path) -> Option<PathBuf> {
    fs::read_link(path).ok()
  }

  fn is_dir(&self, path: &Path) -> bool {
    path.is_dir()
  }

  fn is_writable(&self, path: &Path) -> bool {
    is_writable(path)
  }

  fn create_symlink(&self, target: &Path, link: &Path, directory: bool) -> io::Result<()> {
    debug!("Creating symlink {} -> {}", link.display(), target.display());
    create_symlink(target, link, directory)
  }

  fn remove_tree(&self, path: &Path) -> bool {
    let result = match fs::symlink_metadata(path) {
      Ok(metadata) if metadata.file_type().is_symlink() => remove_symlink(path),
      Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path),
      Ok(_) => fs::remove_file(path),
      Err(e) => Err(e),
    };

    match result {
      Ok(()) => true,
      Err(e) => {
        debug!("Failed to remove {}: {}", path.display(), e);
        false
      }
    }
  }
}

#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
  use std::ffi::CString;
  use std::os::unix::ffi::OsStrExt;

  let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
    return false;
  };

  // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call,
  // and `access` does not retain the pointer.
  unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
  fs::metadata(path)
    .map(|metadata| !metadata.permissions().readonly())
    .unwrap_or(false)
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path, _directory: bool) -> io::Result<()> {
  std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path, directory: bool) -> io::Result<()> {
  if directory {
    std::os::windows::fs::symlink_dir(target, link)
  } else {
    std::os::windows::fs::symlink_file(target, link)
  }
}

#[cfg(unix)]
fn remove_symlink(path: &Path) -> io::Result<()> {
  fs::remove_file(path)
}

// Directory links on Windows are directories as far as removal goes.
#[cfg(windows)]
fn remove_symlink(path: &Path) -> io::Result<()> {
  fs::remove_dir(path).or_else(|_| fs::remove_file(path))
}
