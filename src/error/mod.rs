//! Error handling module for ffkit

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::errors::{ExecError, PlanError, ProbeError, RenameError};

/// Main error type for ffkit operations
#[derive(Error, Debug)]
pub enum FfkitError {
    /// Segment config or plan synthesis failure
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Bit-rate probe failure
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Dispatched command failure
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// Bulk rename failure
    #[error(transparent)]
    Rename(#[from] RenameError),

    /// File could not be read or written
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file could not be parsed
    #[error("invalid settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl FfkitError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FfkitError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Process exit code to report for this error
    ///
    /// A dispatched command that failed with its own code passes it through.
    pub fn exit_code(&self) -> i32 {
        match self {
            FfkitError::Exec(ExecError::NonZeroExit {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Result type alias for ffkit operations
pub type FfkitResult<T> = std::result::Result<T, FfkitError>;
