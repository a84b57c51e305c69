//! # Symlinker CLI Entry Point
//!
//! Invoked by the test harness at suite start (`suite-init`) and suite end
//! (`suite-after`).

use std::process::ExitCode;

use clap::Parser;
use symlinker_cli::cli::{self, Cli};
use symlinker_core::output::print_error;
use tracing::{Level, debug};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing(verbosity: u8) {
  let level = match verbosity {
    0 => Level::WARN,  // Default: warnings and errors
    1 => Level::INFO,  // -v: info, warnings, and errors
    2 => Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => Level::TRACE, // -vvv or more: trace and everything else
  };

  let fmt_layer = fmt::layer()
    .with_writer(std::io::stderr)
    .with_target(false)
    .with_level(true);

  tracing_subscriber::registry()
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .with(fmt_layer)
    .try_init()
    .ok();

  debug!("Tracing initialized with level: {}", level);
}

fn main() -> ExitCode {
  let cmd = Cli::parse();
  cmd.color_mode().apply();

  let ctx = match cmd.context() {
    Ok(ctx) => ctx,
    Err(e) => {
      print_error(&format!("{e:#}"));
      return ExitCode::FAILURE;
    }
  };

  init_tracing(ctx.verbosity);

  match cli::handle_cli(&cmd, &ctx) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&e.to_string());
      ExitCode::FAILURE
    }
  }
}
