//! TOIL ledger CLI library.
//!
//! This crate provides the CLI interface for the TOIL ledger.

mod cli;
pub mod commands;
mod config;
pub mod state;

pub use cli::{Cli, Commands};
pub use config::Config;
