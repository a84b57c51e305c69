//! # Suite Lifecycle Commands
//!
//! `suite-init` and `suite-after`, run by the test harness around a suite.

use anyhow::Result;
use symlinker_core::plugin::PluginContext;
use symlinker_core::{LinkOutcome, SuiteLifecycle, UnlinkOutcome};
use tracing::{debug, info};

use super::load_manager;

pub(crate) fn handle_suite_init(ctx: &PluginContext) -> Result<()> {
  let manager = load_manager(ctx)?;

  match manager.on_suite_init(&ctx.settings)? {
    LinkOutcome::Linked(path) => info!("Suite init linked {}", path.display()),
    LinkOutcome::Replaced(path) => info!("Suite init relinked {}", path.display()),
    LinkOutcome::AlreadyPresent(path) => debug!("Suite init found {} in place", path.display()),
  }

  Ok(())
}

pub(crate) fn handle_suite_after(ctx: &PluginContext) -> Result<()> {
  let manager = load_manager(ctx)?;

  // Removal failures are already reported as warnings and must not fail the
  // run.
  match manager.on_suite_after(&ctx.settings) {
    UnlinkOutcome::Unlinked(path) => info!("Suite after unlinked {}", path.display()),
    UnlinkOutcome::NotPresent(path) => debug!("Suite after found nothing at {}", path.display()),
    UnlinkOutcome::Failed(path) => debug!("Suite after left {} behind", path.display()),
  }

  Ok(())
}
