//! # Check Command
//!
//! Validates the configuration and lists where the project would be linked
//! for each configured environment.

use anyhow::Result;
use symlinker_core::output::{format_environment, format_path, print_info, print_success};
use symlinker_core::plugin::PluginContext;
use symlinker_core::{DestinationConfig, SuiteSettings};

use super::load_manager;

pub(crate) fn handle_check(ctx: &PluginContext) -> Result<()> {
  let manager = load_manager(ctx)?;
  let config = manager.config();

  print_success(&format!(
    "Configuration {} is valid ({} mode)",
    format_path(&ctx.config_path),
    config.mode()
  ));

  match config.destination() {
    DestinationConfig::Single(_) => {
      let link = manager.destination_for(&SuiteSettings::default());
      print_info(&format!("All environments link to {}", format_path(&link)));
    }
    DestinationConfig::ByEnvironment(destinations) => {
      for (environment, _) in destinations.iter() {
        let link = manager.destination_for(&SuiteSettings::with_environment(environment));
        print_info(&format!(
          "{} links to {}",
          format_environment(environment),
          format_path(&link)
        ));
      }
    }
  }

  Ok(())
}
