//! ffkit media helpers
//!
//! Command-line helpers around ffmpeg for cutting segments out of a video,
//! splitting it into stream-copied pieces, and renaming numbered files.
//!
//! # Usage
//!
//! ```bash
//! ffkit cut talk.mkv segments.txt export/
//! ffkit split match.mkv config export/ --dry-run
//! ffkit rename shots/*.jpg
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use ffkit::adapters::init_logging;
use ffkit::cli::{commands, Cli};

/// Main entry point for the ffkit CLI application
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    debug!(command = ?cli.command, "Starting ffkit");

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("error: {:#}", err);
            ExitCode::from(commands::exit_code(&err))
        }
    }
}
