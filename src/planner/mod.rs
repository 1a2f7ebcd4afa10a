//! Command synthesis
//!
//! Turns a validated [`SegmentList`](crate::domain::model::SegmentList) into
//! ffmpeg invocations, either one filter-graph re-encode joining every
//! segment ([`concat`]) or one stream-copy extraction per segment
//! ([`split`]).

pub mod concat;
pub mod split;

pub use concat::ConcatPlanner;
pub use split::SplitPlanner;

/// Leading ffmpeg arguments shared by both planners
fn leading_args(overwrite: bool) -> Vec<String> {
    if overwrite {
        vec!["-y".to_string()]
    } else {
        Vec::new()
    }
}
