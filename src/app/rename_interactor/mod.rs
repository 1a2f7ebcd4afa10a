// Rename interactor - Renames files to their zero-padded sort position

use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::errors::RenameError;
use crate::domain::rules::RenamePolicy;
use crate::error::{FfkitError, FfkitResult};

/// Interactor for the bulk rename use case
pub struct RenameInteractor;

impl RenameInteractor {
    /// Pairs of (old, new) paths in sorted order
    pub fn plan(files: &[PathBuf]) -> FfkitResult<Vec<(PathBuf, PathBuf)>> {
        Ok(RenamePolicy::plan(files)?)
    }

    /// Succeed only when the answer read from `input` is `y` or `Y`
    pub fn confirm(input: &mut dyn BufRead) -> FfkitResult<()> {
        let mut answer = String::new();
        input
            .read_line(&mut answer)
            .map_err(|e| FfkitError::io("failed to read", "stdin", e))?;
        if answer.trim().eq_ignore_ascii_case("y") {
            Ok(())
        } else {
            Err(RenameError::Cancelled.into())
        }
    }

    /// Apply a rename plan
    ///
    /// Files move through temporary names first so a target that is also a
    /// source is never overwritten. Every source must be a regular file and
    /// targets outside the plan must not exist. If any move fails, the moves
    /// already made are undone.
    pub fn apply(plan: &[(PathBuf, PathBuf)]) -> FfkitResult<()> {
        for (old, _) in plan {
            if !old.is_file() {
                return Err(FfkitError::io(
                    "cannot rename",
                    old,
                    std::io::Error::from(std::io::ErrorKind::NotFound),
                ));
            }
        }
        for (_, new) in plan {
            let is_source = plan.iter().any(|(old, _)| old == new);
            if new.exists() && !is_source {
                return Err(refuse_overwrite(new));
            }
        }

        let staged = staging_paths(plan);

        for (index, ((old, _), temp)) in plan.iter().zip(&staged).enumerate() {
            if let Err(e) = move_file(old, temp) {
                roll_back(plan, &staged, index, 0);
                return Err(e);
            }
        }
        for (index, ((old, new), temp)) in plan.iter().zip(&staged).enumerate() {
            if let Err(e) = move_file(temp, new) {
                roll_back(plan, &staged, plan.len(), index);
                return Err(e);
            }
            info!(from = %old.display(), to = %new.display(), "renamed");
        }
        Ok(())
    }
}

/// Hidden temporary names next to each source that collide with nothing on
/// disk and nothing in the plan
fn staging_paths(plan: &[(PathBuf, PathBuf)]) -> Vec<PathBuf> {
    let mut taken: HashSet<PathBuf> = plan
        .iter()
        .flat_map(|(old, new)| [old.clone(), new.clone()])
        .collect();
    let mut counter = 0usize;
    plan.iter()
        .map(|(old, _)| loop {
            let candidate =
                old.with_file_name(format!(".ffkit-rename-{}-{}", std::process::id(), counter));
            counter += 1;
            if !candidate.exists() && taken.insert(candidate.clone()) {
                break candidate;
            }
        })
        .collect()
}

fn move_file(from: &Path, to: &Path) -> FfkitResult<()> {
    if to.exists() {
        return Err(refuse_overwrite(to));
    }
    std::fs::rename(from, to).map_err(|e| FfkitError::io("failed to rename", from, e))
}

fn refuse_overwrite(path: &Path) -> FfkitError {
    FfkitError::io(
        "refusing to overwrite",
        path,
        std::io::Error::from(std::io::ErrorKind::AlreadyExists),
    )
}

/// Undo the first `placed` target moves, then the first `staged_count` staging moves
fn roll_back(plan: &[(PathBuf, PathBuf)], staged: &[PathBuf], staged_count: usize, placed: usize) {
    for ((_, new), temp) in plan.iter().zip(staged).take(placed).rev() {
        if let Err(e) = std::fs::rename(new, temp) {
            warn!(from = %new.display(), to = %temp.display(), error = %e, "rollback failed");
        }
    }
    for ((old, _), temp) in plan.iter().zip(staged).take(staged_count).rev() {
        if let Err(e) = std::fs::rename(temp, old) {
            warn!(from = %temp.display(), to = %old.display(), error = %e, "rollback failed");
        }
    }
}
