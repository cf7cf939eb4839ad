//! CLI subcommand implementations.

pub mod balance;
pub mod clear;
pub mod day;
pub mod export;
pub mod import;
pub mod month;
pub mod status;
pub mod util;
