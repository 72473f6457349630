//! CLI commands

pub mod list;
