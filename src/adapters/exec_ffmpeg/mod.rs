//! Process execution adapter
//!
//! Runs planned commands with inherited stdio so ffmpeg's own progress output
//! reaches the terminal.

use std::process::Command;

use tracing::info;

use crate::domain::errors::ExecError;
use crate::domain::model::PlannedCommand;
use crate::ports::{CommandExecutor, CommandOutcome};

/// `std::process`-based command executor
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, command: &PlannedCommand) -> Result<CommandOutcome, ExecError> {
        info!(output = %command.output_path.display(), "running {}", command.program);

        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .map_err(|source| ExecError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        Ok(CommandOutcome {
            code: status.code(),
        })
    }
}
