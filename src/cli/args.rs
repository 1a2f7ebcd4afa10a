//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments shared by the segment-driven commands
#[derive(Args, Debug)]
pub struct SegmentArgs {
    /// Source media file
    pub source: Option<PathBuf>,

    /// Segment config, one `<START> <END> [LABEL]` per line
    #[arg(default_value = "config")]
    pub config: PathBuf,

    /// Output directory
    #[arg(default_value = "export")]
    pub output: PathBuf,

    /// Print the plan without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Let ffmpeg overwrite existing outputs
    #[arg(short = 'y', long)]
    pub overwrite: bool,
}

/// Arguments for the cut command
#[derive(Args, Debug)]
pub struct CutArgs {
    #[command(flatten)]
    pub segments: SegmentArgs,

    /// Video encoder (default: h264_nvenc)
    #[arg(long, env = "FFKIT_ENCODER")]
    pub encoder: Option<String>,

    /// Extra encoder argument, repeatable
    #[arg(long = "encoder-arg", allow_hyphen_values = true)]
    pub encoder_args: Vec<String>,

    /// Output container extension (default: mp4)
    #[arg(long)]
    pub container: Option<String>,

    /// Source bit rate in bits per second, skips ffprobe
    #[arg(long)]
    pub source_bitrate: Option<u64>,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    #[command(flatten)]
    pub segments: SegmentArgs,
}

/// Arguments for the rename command
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Files to rename
    pub files: Vec<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,

    /// Only show the mapping
    #[arg(long)]
    pub dry_run: bool,
}
