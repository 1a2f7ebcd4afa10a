//! ffkit library
//!
//! Parses segment configs written in a compact time notation and compiles
//! them into ffmpeg command plans: a single filter-graph re-encode joining
//! every segment, or one stream-copy extraction per segment.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod planner;
pub mod ports;
pub mod segments;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::{ExecError, PlanError, ProbeError, RenameError};
pub use domain::model::{
    CommandPlan, EncoderProfile, GraphPlan, PlannedCommand, Segment, SegmentList, TimeValue,
    TrimPlanList,
};
pub use error::{FfkitError, FfkitResult};
