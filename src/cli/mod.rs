//! Command-line front end for the converter.

pub mod args;
pub mod convert;

pub use args::{CliError, ConvertCliConfig, USAGE};
pub use convert::run_convert_cli;
