//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{CharacterSet, ColorModeArg};

/// Convert images and GIFs into terminal text animations and play them back
#[derive(Parser, Debug)]
#[command(name = "ascii-reel")]
#[command(version, about = "Terminal text animations from images and GIFs", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug messages
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log errors only
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert every image in a directory
    Convert(ConvertArgs),
    /// Play converted files (default when no command is given)
    View(ViewArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags for `convert`; each one overrides the config file.
#[derive(clap::Args, Debug, Default)]
pub struct ConvertArgs {
    /// Directory with source images
    #[arg(long)]
    pub images: Option<PathBuf>,

    /// Directory for converted files
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output width in characters
    #[arg(long)]
    pub width: Option<u32>,

    /// Glyph mode
    #[arg(long)]
    pub color_mode: Option<ColorModeArg>,

    /// ASCII character set
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Write rows without run-length encoding
    #[arg(long)]
    pub no_compress: bool,

    /// Shortest run written as a count
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Store every animation frame in full
    #[arg(long)]
    pub no_diff: bool,

    /// Background for transparent pixels (#RRGGBB)
    #[arg(long)]
    pub background: Option<String>,

    /// Convert even if the output already exists
    #[arg(long)]
    pub force: bool,
}

/// Flags for `view`.
#[derive(clap::Args, Debug, Default)]
pub struct ViewArgs {
    /// Directory with converted files
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Strip colors during playback
    #[arg(long)]
    pub no_color: bool,

    /// Frame duration in milliseconds for files without stored delays
    #[arg(long)]
    pub delay: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
