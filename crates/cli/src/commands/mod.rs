//! Subcommand implementations

pub mod batch;
pub mod range;
pub mod request;
