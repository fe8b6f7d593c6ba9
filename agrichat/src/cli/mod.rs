//! CLI argument parsing module.

mod args;
mod commands;
mod repl;

pub use args::Cli;
pub use commands::execute;
