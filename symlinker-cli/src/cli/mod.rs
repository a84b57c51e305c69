//! # Command Line Interface
//!
//! Defines the CLI the test harness invokes around each suite, plus two
//! diagnostics commands for checking a configuration by hand.

mod check;
mod resolve;
mod suite;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use symlinker_core::config::DEFAULT_CONFIG_FILE;
use symlinker_core::plugin::{ENV_COLORS, ENV_CONFIG, PluginContext};
use symlinker_core::{ColorMode, RawConfig, SymlinkManager};
use tracing::debug;

/// Top-level CLI command for the symlinker tool
#[derive(Parser)]
#[command(name = "symlinker")]
#[command(about = "Link a WordPress plugin or theme into a WordPress installation around a test suite")]
#[command(
  long_about = "Symlinker links the plugin or theme under test into a WordPress installation\n\
        before a test suite runs and removes the link once the suite finishes.\n\n\
        The test harness runs `symlinker suite-init` at suite start and\n\
        `symlinker suite-after` at suite end. Context may be passed through\n\
        SYMLINKER_* environment variables; flags take precedence."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages\n\n\
             Falls back to SYMLINKER_VERBOSITY when not given."
  )]
  pub verbose: u8,

  /// Controls when colored output is used [env: SYMLINKER_COLORS]
  #[arg(long, value_enum, ignore_case = true, global = true)]
  pub colors: Option<ColorMode>,

  /// Project root to link [env: SYMLINKER_PROJECT_ROOT, default: current directory]
  #[arg(long = "root", value_name = "PATH", global = true)]
  pub root: Option<PathBuf>,

  /// Configuration file [env: SYMLINKER_CONFIG, default: <root>/symlinker.yml]
  #[arg(long = "config", value_name = "PATH", global = true)]
  pub config: Option<PathBuf>,

  /// Comma-separated active environments [env: SYMLINKER_CURRENT_ENVIRONMENT, default: default]
  #[arg(long = "env", value_name = "ENVS", global = true)]
  pub env: Option<String>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the symlinker tool
#[derive(Subcommand)]
pub enum Commands {
  /// Link the project into the resolved destination (suite start)
  #[command(long_about = "Validates the configuration and links the project folder into the\n\
            destination resolved for the active environments.\n\n\
            Does nothing if the project link or a real directory is already there.\n\
            A link pointing elsewhere is replaced. Fails the run if the link cannot\n\
            be created.")]
  #[command(name = "suite-init", alias = "init")]
  SuiteInit,

  /// Remove the project link from the resolved destination (suite end)
  #[command(long_about = "Validates the configuration and removes the project link from the\n\
            destination resolved for the active environments.\n\n\
            A failed removal is reported as a warning and never fails the run.")]
  #[command(name = "suite-after", alias = "after")]
  SuiteAfter,

  /// Validate the configuration without touching the filesystem
  Check,

  /// Show where the project would be linked
  Resolve(resolve::ResolveArgs),
}

impl Cli {
  /// Build the invocation context, letting flags override environment
  /// variables.
  pub fn context(&self) -> Result<PluginContext> {
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    let mut ctx = PluginContext::from_lookup(cwd.clone(), env_value);

    if let Some(root) = &self.root {
      // Symlink targets must be absolute or they resolve against the link's
      // own directory.
      ctx.project_root = cwd.join(root);
      if env_value(ENV_CONFIG).is_none() {
        ctx.config_path = ctx.project_root.join(DEFAULT_CONFIG_FILE);
      }
    }

    if let Some(config) = &self.config {
      ctx.config_path = config.clone();
    }

    if let Some(envs) = &self.env {
      ctx.settings.current_environment = Some(envs.clone());
    }

    ctx.colors = self.color_mode();

    ctx.verbosity = ctx.verbosity.max(self.verbose);

    Ok(ctx)
  }

  /// Color preference from `--colors`, falling back to SYMLINKER_COLORS.
  ///
  /// Available before [`Self::context`] so its errors honor the preference.
  pub fn color_mode(&self) -> ColorMode {
    self.colors.unwrap_or_else(|| {
      env_value(ENV_COLORS)
        .map(|value| ColorMode::from_env_value(&value))
        .unwrap_or_default()
    })
  }
}

/// Read an environment variable, treating blank values as unset.
fn env_value(key: &str) -> Option<String> {
  env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Handle the parsed CLI command
pub fn handle_cli(cli: &Cli, ctx: &PluginContext) -> Result<()> {
  match &cli.command {
    Commands::SuiteInit => suite::handle_suite_init(ctx),
    Commands::SuiteAfter => suite::handle_suite_after(ctx),
    Commands::Check => check::handle_check(ctx),
    Commands::Resolve(args) => resolve::handle_resolve(ctx, args),
  }
}

/// Load and validate the configuration for this invocation.
fn load_manager(ctx: &PluginContext) -> Result<SymlinkManager> {
  debug!(
    "Loading configuration from {} for project {}",
    ctx.config_path.display(),
    ctx.project_root.display()
  );

  let raw = RawConfig::load(&ctx.config_path)?;
  let manager = SymlinkManager::new(&raw, &ctx.project_root)?;
  Ok(manager)
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn verify_cli() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_flags_override_context() {
    let cli = Cli::parse_from([
      "symlinker",
      "--root",
      "/proj/my-plugin",
      "--env",
      "ci",
      "--colors",
      "no",
      "-vv",
      "suite-init",
    ]);
    let ctx = cli.context().unwrap();

    assert_eq!(ctx.project_root, PathBuf::from("/proj/my-plugin"));
    assert_eq!(ctx.settings.current_environment.as_deref(), Some("ci"));
    assert_eq!(ctx.colors, ColorMode::No);
    assert!(ctx.verbosity >= 2);
    assert!(matches!(cli.command, Commands::SuiteInit));
  }

  #[test]
  fn test_color_flag_is_known_before_context() {
    let cli = Cli::parse_from(["symlinker", "--colors", "no", "check"]);
    assert_eq!(cli.color_mode(), ColorMode::No);
  }

  #[test]
  fn test_explicit_config_flag() {
    let cli = Cli::parse_from(["symlinker", "check", "--config", "/etc/wp/symlinker.yml"]);
    let ctx = cli.context().unwrap();
    assert_eq!(ctx.config_path, PathBuf::from("/etc/wp/symlinker.yml"));
  }

  #[test]
  fn test_lifecycle_aliases() {
    assert!(matches!(
      Cli::parse_from(["symlinker", "init"]).command,
      Commands::SuiteInit
    ));
    assert!(matches!(
      Cli::parse_from(["symlinker", "after"]).command,
      Commands::SuiteAfter
    ));
  }
}
