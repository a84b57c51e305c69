//! # Output Formatting
//!
//! Status lines written to the test harness's console, with colors and emoji
//! prefixes when the terminal supports them.

use std::path::Path;

use owo_colors::Stream::{Stderr, Stdout};
use owo_colors::{OwoColorize, Style};
use {clap, emojis};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  #[default]
  Auto,
  /// Disable colored output
  No,
}

impl ColorMode {
  /// Parse the value of a colors environment variable; unknown values mean
  /// [`ColorMode::Auto`].
  pub fn from_env_value(value: &str) -> Self {
    if value.eq_ignore_ascii_case("yes") {
      ColorMode::Yes
    } else if value.eq_ignore_ascii_case("no") {
      ColorMode::No
    } else {
      ColorMode::Auto
    }
  }

  /// Apply this mode to all subsequent output.
  pub fn apply(self) {
    match self {
      ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::No => owo_colors::set_override(false),
      ColorMode::Auto => owo_colors::unset_override(),
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.if_supports_color(Stdout, |t| t.style(Style::new().green().bold())), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.if_supports_color(Stderr, |t| t.style(Style::new().red().bold())), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.if_supports_color(Stdout, |t| t.style(Style::new().yellow().bold())), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.if_supports_color(Stdout, |t| t.style(Style::new().blue().bold())), message);
}

/// Format a filesystem path
pub fn format_path(path: &Path) -> String {
  path.display().if_supports_color(Stdout, |t| t.bright_green()).to_string()
}

/// Format an environment name
pub fn format_environment(name: &str) -> String {
  name.if_supports_color(Stdout, |t| t.style(Style::new().bright_cyan().bold())).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_emoji_or_default() {
    let result = get_emoji_or_default("check_mark", "✓");
    assert!(!result.is_empty());

    let result = get_emoji_or_default("nonexistent_emoji", "fallback");
    assert_eq!(result, "fallback");
  }

  #[test]
  fn test_color_mode_from_env_value() {
    assert_eq!(ColorMode::from_env_value("YES"), ColorMode::Yes);
    assert_eq!(ColorMode::from_env_value("no"), ColorMode::No);
    assert_eq!(ColorMode::from_env_value("auto"), ColorMode::Auto);
    assert_eq!(ColorMode::from_env_value("sometimes"), ColorMode::Auto);
  }

  #[test]
  fn test_format_functions() {
    assert!(format_path(Path::new("/var/www")).contains("/var/www"));
    assert!(format_environment("docker").contains("docker"));
  }
}
