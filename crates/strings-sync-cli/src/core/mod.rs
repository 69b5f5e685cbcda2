//! Errors shared by the CLI commands.

mod errors;

pub use errors::*;
