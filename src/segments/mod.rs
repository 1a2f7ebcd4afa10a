//! Segment configuration parsing
//!
//! A segment config is plain text, one segment per line:
//!
//! ```text
//! <START> <END> [LABEL]
//! ```
//!
//! Blank lines are skipped. Comments are not supported.

use tracing::debug;

use crate::domain::errors::PlanError;
use crate::domain::model::{Segment, SegmentList};
use crate::utils::time::parse_compact_time;

/// Parse a whole segment config, failing on the first bad line
///
/// Ordering of start and end is left to the planner that needs it.
pub fn parse(text: &str) -> Result<SegmentList, PlanError> {
    let mut segments = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let segment = match tokens.as_slice() {
            [start, end] => Segment::new(parse_compact_time(start)?, parse_compact_time(end)?),
            [start, end, label] => {
                Segment::new(parse_compact_time(start)?, parse_compact_time(end)?)
                    .with_label(*label)
            }
            _ => {
                return Err(PlanError::MalformedSegment {
                    line: index + 1,
                    tokens: tokens.len(),
                    text: line.trim().to_string(),
                })
            }
        };

        debug!(
            line = index + 1,
            start = %segment.start,
            end = %segment.end,
            label = segment.label.as_deref().unwrap_or(""),
            "parsed segment"
        );
        segments.push(segment);
    }

    SegmentList::new(segments)
}
