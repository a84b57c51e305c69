//! # Symlinker Core Library
//!
//! Links a WordPress plugin or theme into a WordPress installation for the
//! duration of a test suite. The test harness validates the configuration
//! once, then calls [`SuiteLifecycle::on_suite_init`] before the suite and
//! [`SuiteLifecycle::on_suite_after`] once it finishes.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use symlinker_core::{RawConfig, SuiteLifecycle, SuiteSettings, SymlinkManager};
//!
//! # fn main() -> symlinker_core::Result<()> {
//! let raw = RawConfig::load(Path::new("symlinker.yml"))?;
//! let manager = SymlinkManager::new(&raw, Path::new("/work/my-plugin"))?;
//! let settings = SuiteSettings::with_environment("default");
//!
//! manager.on_suite_init(&settings)?;
//! // ... run the suite ...
//! manager.on_suite_after(&settings);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod fs;
pub mod manager;
pub mod output;
pub mod plugin;
pub mod resolver;

pub use config::{Config, DestinationConfig, EnvironmentDestinations, Mode, ModeSetting, RawConfig};
pub use environment::{RuntimeEnvironmentSet, SuiteSettings};
pub use error::{ConfigError, Error, LifecycleError, Result};
pub use fs::{Filesystem, OsFilesystem};
pub use manager::{LinkOutcome, SuiteLifecycle, SymlinkManager, UnlinkOutcome};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use plugin::PluginContext;
pub use resolver::{ResolvedDestination, resolve, resolve_entry};
