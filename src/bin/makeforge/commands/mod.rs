//! Command implementations.

pub mod completions;
pub mod generate;
pub mod init;
