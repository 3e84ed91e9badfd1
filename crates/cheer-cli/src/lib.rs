//! # cheer-cli
//!
//! Wiring and commands behind the `cheer` binary.

pub mod bootstrap;
pub mod commands;

pub use bootstrap::create_service_context;
pub use commands::{Cli, Command};
