// Application layer - Use case orchestration

pub mod container;
pub mod cut_interactor;
pub mod rename_interactor;
pub mod split_interactor;

pub use container::AppContainer;
pub use cut_interactor::{CutInteractor, CutRequest};
pub use rename_interactor::RenameInteractor;
pub use split_interactor::{SplitInteractor, SplitRequest};

use std::path::Path;

use tracing::{error, info};

use crate::domain::errors::ExecError;
use crate::domain::model::{CommandPlan, SegmentList};
use crate::error::{FfkitError, FfkitResult};
use crate::ports::CommandExecutor;
use crate::segments;

/// Read and parse a segment config file
pub fn read_segments(path: &Path) -> FfkitResult<SegmentList> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| FfkitError::io("failed to read segment config", path, e))?;
    let list = segments::parse(&text)?;
    info!(config = %path.display(), segments = list.len(), "parsed segment config");
    Ok(list)
}

/// Summary of a finished dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub completed: usize,
}

/// Runs a plan's commands one after another
pub struct Dispatcher<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> Dispatcher<'a> {
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Run every command in order, stopping at the first failure
    ///
    /// Outputs written before the failing command are left in place.
    pub fn dispatch(&self, plan: &CommandPlan) -> FfkitResult<DispatchReport> {
        let commands = plan.commands();

        for command in commands {
            if let Some(parent) = command.output_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| FfkitError::io("failed to create output directory", parent, e))?;
                }
            }
        }

        for (index, command) in commands.iter().enumerate() {
            let outcome = self.executor.execute(command)?;
            if !outcome.success() {
                error!(
                    completed = index,
                    total = commands.len(),
                    code = ?outcome.code,
                    "command failed, stopping"
                );
                return Err(ExecError::NonZeroExit {
                    program: command.program.clone(),
                    code: outcome.code,
                    output: command.output_path.clone(),
                }
                .into());
            }
        }

        info!(completed = commands.len(), "all commands finished");
        Ok(DispatchReport {
            completed: commands.len(),
        })
    }
}
