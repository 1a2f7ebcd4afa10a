// Domain models - Core types and data structures

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::errors::PlanError;

/// A non-negative point or span on the media timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeValue(Duration);

impl TimeValue {
    /// Create a new TimeValue from whole seconds
    pub fn from_secs(seconds: u64) -> Self {
        Self(Duration::from_secs(seconds))
    }

    /// Create a new TimeValue from hours, minutes and seconds
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self::from_secs(hours * 3600 + minutes * 60 + seconds)
    }

    pub fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Whole seconds, sub-second part dropped
    pub fn whole_seconds(&self) -> u64 {
        self.0.as_secs()
    }

    pub fn subsec_micros(&self) -> u32 {
        self.0.subsec_micros()
    }

    /// Absolute distance to another time point
    pub fn abs_diff(&self, other: &TimeValue) -> TimeValue {
        if self >= other {
            Self(self.0 - other.0)
        } else {
            Self(other.0 - self.0)
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::utils::time::to_command_argument(self))
    }
}

/// One requested cut out of the source media
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub start: TimeValue,
    pub end: TimeValue,
    pub label: Option<String>,
}

impl Segment {
    pub fn new(start: TimeValue, end: TimeValue) -> Self {
        Self {
            start,
            end,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Filename prefix derived from the label, `"{label}-"` or empty
    pub fn prefix(&self) -> String {
        match &self.label {
            Some(label) => format!("{}-", label),
            None => String::new(),
        }
    }

    /// True when the segment runs forward in time
    pub fn is_forward(&self) -> bool {
        self.end > self.start
    }
}

/// Ordered, non-empty list of segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentList {
    segments: Vec<Segment>,
}

impl SegmentList {
    /// Wrap parsed segments, rejecting an empty list
    pub fn new(segments: Vec<Segment>) -> Result<Self, PlanError> {
        if segments.is_empty() {
            return Err(PlanError::EmptySegmentList);
        }
        Ok(Self { segments })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }
}

impl<'a> IntoIterator for &'a SegmentList {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Encoder selection for the re-encoding concat plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncoderProfile {
    /// Video encoder passed to `-c:v`
    pub codec: String,
    /// Extra arguments placed right after the codec selection
    pub extra_args: Vec<String>,
    /// Container extension of the combined output, without the dot
    pub container: String,
}

impl Default for EncoderProfile {
    fn default() -> Self {
        Self {
            codec: "h264_nvenc".to_string(),
            extra_args: Vec::new(),
            container: "mp4".to_string(),
        }
    }
}

/// One external invocation, ready to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCommand {
    pub program: String,
    pub args: Vec<String>,
    pub output_path: PathBuf,
}

impl PlannedCommand {
    /// Program name followed by its arguments
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for PlannedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.argv().iter().map(|arg| quote_arg(arg)).collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// Quote an argument for display when a shell would split it
fn quote_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Single re-encode joining every segment into one output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphPlan {
    pub filter_expression: String,
    /// Number of (video, audio) pairs fed to the concat node
    pub concat_inputs: usize,
    pub target_bitrate: u64,
    pub command: PlannedCommand,
}

/// One stream-copy extraction per segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrimPlanList {
    pub commands: Vec<PlannedCommand>,
}

/// Either compilation strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandPlan {
    Graph(GraphPlan),
    Trim(TrimPlanList),
}

impl CommandPlan {
    /// Commands in dispatch order
    pub fn commands(&self) -> &[PlannedCommand] {
        match self {
            CommandPlan::Graph(plan) => std::slice::from_ref(&plan.command),
            CommandPlan::Trim(plan) => &plan.commands,
        }
    }
}

impl From<GraphPlan> for CommandPlan {
    fn from(plan: GraphPlan) -> Self {
        CommandPlan::Graph(plan)
    }
}

impl From<TrimPlanList> for CommandPlan {
    fn from(plan: TrimPlanList) -> Self {
        CommandPlan::Trim(plan)
    }
}
