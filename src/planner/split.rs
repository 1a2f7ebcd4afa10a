//! Independent-trim planning
//!
//! One stream-copy command per segment, seeking to the segment start and
//! bounding the output by the segment length.

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::errors::PlanError;
use crate::domain::model::*;
use crate::domain::rules::{pad_width, padded_index, SegmentOrderPolicy};
use crate::utils::path::indexed_output;
use crate::utils::time::{time_difference, to_command_argument};

/// Planner for per-segment lossless extraction
#[derive(Debug, Clone)]
pub struct SplitPlanner {
    ffmpeg: String,
    overwrite: bool,
}

impl SplitPlanner {
    pub fn new(ffmpeg: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            overwrite: false,
        }
    }

    /// Pass `-y` so ffmpeg replaces existing outputs
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Build one command per segment, in input order
    ///
    /// A segment whose end precedes its start is cut for the absolute
    /// difference starting at `start`.
    pub fn plan(
        &self,
        source: &Path,
        dest_dir: &Path,
        segments: &SegmentList,
    ) -> Result<TrimPlanList, PlanError> {
        for index in SegmentOrderPolicy::non_forward_indices(segments) {
            warn!(index, "segment does not run forward, cutting the absolute difference");
        }

        let width = pad_width(segments.len());
        let mut commands = Vec::with_capacity(segments.len());

        for (i, segment) in segments.iter().enumerate() {
            let duration = time_difference(&segment.start, &segment.end)?;
            let output_path =
                indexed_output(source, dest_dir, &segment.prefix(), &padded_index(i, width));

            let mut args = super::leading_args(self.overwrite);
            args.extend([
                "-ss".to_string(),
                to_command_argument(&segment.start),
                "-i".to_string(),
                source.to_string_lossy().to_string(),
                "-to".to_string(),
                to_command_argument(&duration),
                "-c".to_string(),
                "copy".to_string(),
                output_path.to_string_lossy().to_string(),
            ]);

            debug!(index = i, output = %output_path.display(), "planned split command");
            commands.push(PlannedCommand {
                program: self.ffmpeg.clone(),
                args,
                output_path,
            });
        }

        Ok(TrimPlanList { commands })
    }
}
