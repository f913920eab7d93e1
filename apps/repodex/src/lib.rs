//! # repodex
//!
//! Application layer of repodex: CLI, configuration and the GitHub client.
//! The deterministic pipeline lives in `repodex-core`.

pub mod cli;
pub mod config;
pub mod github;
