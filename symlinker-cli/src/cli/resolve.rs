//! # Resolve Command
//!
//! Shows the link path for the active environments, as the lifecycle hooks
//! would compute it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use symlinker_core::output::{format_environment, format_path, print_info};
use symlinker_core::plugin::PluginContext;

use super::load_manager;

/// Command for showing the resolved destination
#[derive(Args)]
pub struct ResolveArgs {
  /// Print the result as JSON
  #[arg(long)]
  pub json: bool,
}

/// Resolution result as printed by `--json`.
#[derive(Debug, Serialize)]
struct ResolveReport {
  destination: PathBuf,
  project_root: PathBuf,
  environments: Vec<String>,
  matched_environment: Option<String>,
  fallback: bool,
}

pub(crate) fn handle_resolve(ctx: &PluginContext, args: &ResolveArgs) -> Result<()> {
  let manager = load_manager(ctx)?;
  let resolved = manager.resolve(&ctx.settings);

  let report = ResolveReport {
    destination: resolved.path,
    project_root: manager.project_root().to_path_buf(),
    environments: ctx.settings.environments().names().to_vec(),
    matched_environment: resolved.environment,
    fallback: resolved.fallback,
  };

  if args.json {
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize resolution")?;
    println!("{json}");
    return Ok(());
  }

  println!("{}", report.destination.display());

  match (&report.matched_environment, report.fallback) {
    (Some(environment), true) => print_info(&format!(
      "No active environment is configured; using fallback entry {}",
      format_environment(environment)
    )),
    (Some(environment), false) => print_info(&format!(
      "Using entry {} for {}",
      format_environment(environment),
      format_path(&report.project_root)
    )),
    (None, _) => print_info("Using the single configured destination"),
  }

  Ok(())
}
