//! CLI module for memprompt - command-line interface and subcommands.
//!
//! Provides subcommands for inspecting and filling templates and for
//! building memory-augmented prompts.

pub mod commands;

pub use commands::Cli;
