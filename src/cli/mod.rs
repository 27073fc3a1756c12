//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction, ConvertArgs, ViewArgs};
pub use commands::{
    apply_convert_args, apply_view_args, handle_config_action, run_convert, run_view,
    CommandError,
};
pub use enums::{CharacterSet, ColorModeArg};
