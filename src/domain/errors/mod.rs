// Domain errors - Failure taxonomy for parsing, planning, probing and dispatch

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a segment config into a command plan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A time token could not be read as `H:MM:SS`, `MM:SS` or `SS`
    #[error("malformed time '{token}': {reason}")]
    MalformedTime { token: String, reason: String },

    /// A config line did not carry 2 or 3 tokens
    #[error("malformed segment on line {line}: expected 2 or 3 tokens, found {tokens} in '{text}'")]
    MalformedSegment {
        line: usize,
        tokens: usize,
        text: String,
    },

    /// The config contained no usable segment
    #[error("received empty configuration, no segment to process")]
    EmptySegmentList,

    /// A segment ends at or before its start where a forward range is required
    #[error("segment {index} ends at {end} which is not after its start {start}")]
    SegmentOrder {
        index: usize,
        start: String,
        end: String,
    },

    /// The distance between two time points is beyond one day
    #[error("time range between {start} and {end} exceeds 24 hours")]
    TimeRangeOverflow { start: String, end: String },

    /// The source bit rate leaves no room for video after the audio headroom
    #[error("source bit rate {source_bitrate} bps gives non-positive video target {target} bps")]
    NonPositiveBitrate { source_bitrate: u64, target: i64 },
}

/// Errors raised by the bit-rate probe
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe program could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The probe ran but reported failure
    #[error("{program} failed on {path} (exit code {code:?}): {stderr}")]
    Failed {
        program: String,
        path: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// The probe output did not have the expected shape
    #[error("unexpected probe response: {reason}")]
    MalformedResponse { reason: String },
}

/// Errors raised while dispatching planned commands
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program exited unsuccessfully
    #[error("{program} exited with {} while producing {output}", describe_exit(.code))]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        output: PathBuf,
    },
}

/// Errors raised by the bulk renamer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
    #[error("at least 2 files are required for bulk rename, got {count}")]
    TooFewFiles { count: usize },

    #[error("file listed more than once: {path}")]
    DuplicateFile { path: String },

    #[error("inconsistent extension: '{expected}' vs '{found}'")]
    InconsistentExtension { expected: String, found: String },

    #[error("rename cancelled")]
    Cancelled,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}
