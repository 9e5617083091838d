//! Subcommands.

pub mod config;
pub mod parse;
