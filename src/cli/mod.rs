//! CLI command handlers for Folio.
//!
//! This module provides headless, scriptable access to the accent preference
//! and the reveal timing policy.

pub mod accent;
pub mod common;
pub mod config;
pub mod reveal;

// Re-export types used by main.rs and tests
pub use accent::AccentArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use reveal::RevealArgs;
