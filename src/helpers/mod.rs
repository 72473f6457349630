//! Helper functions shared by templates and the CLI

pub mod date;
