//! CLI module for ffkit
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::LogFormat;

pub mod args;
pub mod commands;

/// ffkit media helpers
///
/// Cut segments out of a video and join them, split a video into
/// stream-copied pieces, or bulk-rename numbered files.
#[derive(Parser, Debug)]
#[command(name = "ffkit")]
#[command(about = "ffkit - cut, split and rename media files with ffmpeg")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Log output format: pretty or json
    #[arg(long, default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    /// Settings file (default: ./ffkit.toml when present)
    #[arg(long, env = "FFKIT_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,

    /// ffmpeg program to run
    #[arg(long, env = "FFKIT_FFMPEG", global = true)]
    pub ffmpeg: Option<String>,

    /// ffprobe program to run
    #[arg(long, env = "FFKIT_FFPROBE", global = true)]
    pub ffprobe: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut configured segments and join them into one re-encoded file
    Cut(args::CutArgs),
    /// Split configured segments into separate stream-copied files
    Split(args::SplitArgs),
    /// Rename files to their zero-padded sort position
    Rename(args::RenameArgs),
}
