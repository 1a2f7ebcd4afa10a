// Domain rules - Business logic and policies

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Bit rate reserved for the audio stream of a re-encoded output
pub const AUDIO_HEADROOM_BPS: u64 = 128_000;

/// Minimum width of zero-padded output indices
pub const MIN_INDEX_WIDTH: usize = 2;

/// Width used to zero-pad indices for `count` outputs
///
/// Shared by the split planner and the bulk renamer so numbered files sort
/// the same way across the toolset.
pub fn pad_width(count: usize) -> usize {
    let digits = count.checked_ilog10().map_or(1, |log| log as usize + 1);
    digits.max(MIN_INDEX_WIDTH)
}

/// Zero-pad `index` to `width` digits
pub fn padded_index(index: usize, width: usize) -> String {
    format!("{:0width$}", index, width = width)
}

/// Video bit rate target left once the audio headroom is taken out
pub fn target_bitrate(source_bitrate: u64) -> Result<u64, PlanError> {
    source_bitrate
        .checked_sub(AUDIO_HEADROOM_BPS)
        .filter(|target| *target > 0)
        .ok_or_else(|| PlanError::NonPositiveBitrate {
            source_bitrate,
            // source_bitrate <= AUDIO_HEADROOM_BPS here
            target: source_bitrate as i64 - AUDIO_HEADROOM_BPS as i64,
        })
}

/// Business rules for segment ordering
pub struct SegmentOrderPolicy;

impl SegmentOrderPolicy {
    /// Reject any segment whose end is not after its start
    pub fn require_forward(segments: &SegmentList) -> Result<(), PlanError> {
        match segments.iter().position(|segment| !segment.is_forward()) {
            Some(index) => {
                let segment = &segments.as_slice()[index];
                Err(PlanError::SegmentOrder {
                    index,
                    start: segment.start.to_string(),
                    end: segment.end.to_string(),
                })
            }
            None => Ok(()),
        }
    }

    /// Indices of segments that do not run forward
    pub fn non_forward_indices(segments: &SegmentList) -> Vec<usize> {
        segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| !segment.is_forward())
            .map(|(index, _)| index)
            .collect()
    }
}

/// Business rules for the bulk renamer
pub struct RenamePolicy;

impl RenamePolicy {
    /// Extension shared by every file, including the leading dot
    ///
    /// Files without an extension share the empty one.
    pub fn common_extension(files: &[PathBuf]) -> Result<String, RenameError> {
        let mut extensions = files.iter().map(|file| extension_of(file));
        let expected = extensions.next().unwrap_or_default();
        for found in extensions {
            if found != expected {
                return Err(RenameError::InconsistentExtension { expected, found });
            }
        }
        Ok(expected)
    }

    /// Pair each file, sorted by path, with its 1-based padded name
    pub fn plan(files: &[PathBuf]) -> Result<Vec<(PathBuf, PathBuf)>, RenameError> {
        if files.len() < 2 {
            return Err(RenameError::TooFewFiles { count: files.len() });
        }

        let mut sorted = files.to_vec();
        sorted.sort();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(RenameError::DuplicateFile {
                path: pair[0].display().to_string(),
            });
        }

        let extension = Self::common_extension(&sorted)?;
        let width = pad_width(sorted.len());

        Ok(sorted
            .into_iter()
            .enumerate()
            .map(|(index, old)| {
                let name = format!("{}{}", padded_index(index + 1, width), extension);
                let new = match old.parent() {
                    Some(parent) => parent.join(name),
                    None => PathBuf::from(name),
                };
                (old, new)
            })
            .collect())
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
