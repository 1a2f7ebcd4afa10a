// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::PlannedCommand;

/// Port for reading a source's container bit rate
pub trait BitrateProbe {
    /// Bits per second reported for the whole container
    fn probe_bitrate(&self, source: &Path) -> Result<u64, ProbeError>;
}

/// Exit status of a finished command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Process exit code, `None` when killed by a signal
    pub code: Option<i32>,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Port for running planned commands
pub trait CommandExecutor {
    /// Run one command to completion
    fn execute(&self, command: &PlannedCommand) -> Result<CommandOutcome, ExecError>;
}
