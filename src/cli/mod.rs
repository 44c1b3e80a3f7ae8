//! CLI command implementation

pub mod error;
pub mod sizes;

pub use error::CliError;
pub use sizes::Cli;
