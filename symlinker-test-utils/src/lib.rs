//! Test utilities shared across the wp-symlinker workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary WordPress installations with a project to link
//!   ([`WordPressInstallGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod wordpress;

// Re-export commonly used items
pub use wordpress::{DEFAULT_PROJECT_NAME, WordPressInstallGuard};
