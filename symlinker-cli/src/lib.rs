//! # Symlinker CLI Library
//!
//! Command-line layer the test harness invokes around each suite. Exposed as
//! a library so the argument parsing and context handling can be tested.

pub mod cli;
