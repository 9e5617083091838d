//! Data models for candidate files, extracted records, and configuration.

pub mod candidate;
pub mod config;
pub mod record;
