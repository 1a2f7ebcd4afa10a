//! Trim-and-concat planning
//!
//! Every segment becomes a `trim`/`atrim` pair on the first video and audio
//! stream, with timestamps reset to zero. A final `concat` node joins the
//! pairs in segment order and the result is re-encoded at the source bit rate
//! minus the audio headroom.

use std::path::Path;

use tracing::{debug, info};

use crate::domain::errors::PlanError;
use crate::domain::model::*;
use crate::domain::rules::{target_bitrate, SegmentOrderPolicy};
use crate::error::FfkitResult;
use crate::ports::BitrateProbe;
use crate::utils::path::with_container;
use crate::utils::time::to_filter_seconds;

/// Output pad labels of the concat node
pub const VIDEO_OUT_LABEL: &str = "[outv]";
pub const AUDIO_OUT_LABEL: &str = "[outa]";

/// Planner for the single re-encode joining all segments
#[derive(Debug, Clone)]
pub struct ConcatPlanner {
    ffmpeg: String,
    profile: EncoderProfile,
    overwrite: bool,
}

impl ConcatPlanner {
    pub fn new(ffmpeg: impl Into<String>, profile: EncoderProfile) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            profile,
            overwrite: false,
        }
    }

    /// Pass `-y` so ffmpeg replaces existing outputs
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn profile(&self) -> &EncoderProfile {
        &self.profile
    }

    /// Build the filter graph joining every segment
    pub fn build_filter(segments: &SegmentList) -> String {
        let mut graph = String::new();

        for (i, segment) in segments.iter().enumerate() {
            let start = to_filter_seconds(&segment.start);
            let end = to_filter_seconds(&segment.end);
            graph.push_str(&format!(
                "[0:v]trim={}:{},setpts=PTS-STARTPTS[v{}];",
                start, end, i
            ));
            graph.push_str(&format!(
                "[0:a]atrim={}:{},asetpts=PTS-STARTPTS[a{}];",
                start, end, i
            ));
        }

        let count = segments.len();
        for i in 0..count {
            graph.push_str(&format!("[v{}][a{}]", i, i));
        }
        graph.push_str(&format!(
            "concat=n={}:v=1:a=1{}{}",
            count, VIDEO_OUT_LABEL, AUDIO_OUT_LABEL
        ));

        graph
    }

    /// Probe the source once, then plan
    pub fn plan(
        &self,
        source: &Path,
        dest_dir: &Path,
        segments: &SegmentList,
        probe: &dyn BitrateProbe,
    ) -> FfkitResult<GraphPlan> {
        SegmentOrderPolicy::require_forward(segments)?;

        let source_bitrate = probe.probe_bitrate(source)?;
        info!(source = %source.display(), source_bitrate, "probed source bit rate");

        Ok(self.plan_with_bitrate(source, dest_dir, segments, source_bitrate)?)
    }

    /// Plan against a known source bit rate
    pub fn plan_with_bitrate(
        &self,
        source: &Path,
        dest_dir: &Path,
        segments: &SegmentList,
        source_bitrate: u64,
    ) -> Result<GraphPlan, PlanError> {
        SegmentOrderPolicy::require_forward(segments)?;

        let target = target_bitrate(source_bitrate)?;
        let filter_expression = Self::build_filter(segments);
        let output_path = with_container(source, dest_dir, &self.profile.container);

        let mut args = super::leading_args(self.overwrite);
        args.extend([
            "-i".to_string(),
            source.to_string_lossy().to_string(),
            "-filter_complex".to_string(),
            filter_expression.clone(),
            "-map".to_string(),
            VIDEO_OUT_LABEL.to_string(),
            "-map".to_string(),
            AUDIO_OUT_LABEL.to_string(),
            "-c:v".to_string(),
            self.profile.codec.clone(),
        ]);
        args.extend(self.profile.extra_args.iter().cloned());
        args.extend([
            "-b:v".to_string(),
            target.to_string(),
            output_path.to_string_lossy().to_string(),
        ]);

        debug!(segments = segments.len(), target_bitrate = target, "built concat plan");

        Ok(GraphPlan {
            filter_expression,
            concat_inputs: segments.len(),
            target_bitrate: target,
            command: PlannedCommand {
                program: self.ffmpeg.clone(),
                args,
                output_path,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ProbeError;
    use crate::error::FfkitError;
    use std::cell::Cell;
    use std::path::PathBuf;

    struct FixedProbe {
        bitrate: u64,
        calls: Cell<usize>,
    }

    impl FixedProbe {
        fn new(bitrate: u64) -> Self {
            Self {
                bitrate,
                calls: Cell::new(0),
            }
        }
    }

    impl BitrateProbe for FixedProbe {
        fn probe_bitrate(&self, _source: &Path) -> Result<u64, ProbeError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.bitrate)
        }
    }

    fn segments(ranges: &[(u64, u64)]) -> SegmentList {
        SegmentList::new(
            ranges
                .iter()
                .map(|(s, e)| Segment::new(TimeValue::from_secs(*s), TimeValue::from_secs(*e)))
                .collect(),
        )
        .unwrap()
    }

    fn planner() -> ConcatPlanner {
        ConcatPlanner::new("ffmpeg", EncoderProfile::default())
    }

    #[test]
    fn test_build_filter_single_segment() {
        assert_eq!(
            ConcatPlanner::build_filter(&segments(&[(90, 120)])),
            "[0:v]trim=90:120,setpts=PTS-STARTPTS[v0];\
             [0:a]atrim=90:120,asetpts=PTS-STARTPTS[a0];\
             [v0][a0]concat=n=1:v=1:a=1[outv][outa]"
        );
    }

    #[test]
    fn test_build_filter_pairs_in_segment_order() {
        let filter = ConcatPlanner::build_filter(&segments(&[(30, 40), (0, 10), (50, 55)]));
        assert!(filter.starts_with("[0:v]trim=30:40,setpts=PTS-STARTPTS[v0];"));
        assert!(filter.contains("[0:a]atrim=0:10,asetpts=PTS-STARTPTS[a1];"));
        assert!(filter.ends_with("[v0][a0][v1][a1][v2][a2]concat=n=3:v=1:a=1[outv][outa]"));
    }

    #[test]
    fn test_concat_count_matches_segment_count() {
        for count in 1..=12u64 {
            let ranges: Vec<(u64, u64)> = (0..count).map(|i| (i * 10, i * 10 + 5)).collect();
            let list = segments(&ranges);
            let plan = planner()
                .plan_with_bitrate(Path::new("a.mkv"), Path::new("export"), &list, 1_000_000)
                .unwrap();
            assert_eq!(plan.concat_inputs, list.len());
            assert!(plan
                .filter_expression
                .contains(&format!("concat=n={}:", list.len())));
            assert_eq!(plan.filter_expression.matches("setpts").count(), 2 * list.len());
        }
    }

    #[test]
    fn test_plan_command_layout() {
        let plan = planner()
            .plan_with_bitrate(
                Path::new("/videos/talk.mkv"),
                Path::new("export"),
                &segments(&[(10, 20)]),
                5_000_000,
            )
            .unwrap();

        assert_eq!(plan.target_bitrate, 4_872_000);
        assert_eq!(plan.command.program, "ffmpeg");
        assert_eq!(plan.command.output_path, PathBuf::from("export/talk.mp4"));
        assert_eq!(
            plan.command.args,
            vec![
                "-i",
                "/videos/talk.mkv",
                "-filter_complex",
                plan.filter_expression.as_str(),
                "-map",
                "[outv]",
                "-map",
                "[outa]",
                "-c:v",
                "h264_nvenc",
                "-b:v",
                "4872000",
                "export/talk.mp4",
            ]
        );
    }

    #[test]
    fn test_plan_uses_encoder_profile_and_overwrite() {
        let profile = EncoderProfile {
            codec: "libx264".to_string(),
            extra_args: vec!["-preset".to_string(), "slow".to_string()],
            container: "mkv".to_string(),
        };
        let plan = ConcatPlanner::new("/opt/ffmpeg", profile)
            .with_overwrite(true)
            .plan_with_bitrate(Path::new("clip.mov"), Path::new("out"), &segments(&[(0, 1)]), 500_000)
            .unwrap();

        let args = &plan.command.args;
        assert_eq!(plan.command.program, "/opt/ffmpeg");
        assert_eq!(args[0], "-y");
        let codec_at = args.iter().position(|a| a == "-c:v").unwrap();
        assert_eq!(&args[codec_at + 1..codec_at + 4], &["libx264", "-preset", "slow"]);
        assert_eq!(plan.command.output_path, PathBuf::from("out/clip.mkv"));
    }

    #[test]
    fn test_plan_rejects_reversed_segment_before_probing() {
        let probe = FixedProbe::new(5_000_000);
        let err = planner()
            .plan(
                Path::new("a.mkv"),
                Path::new("export"),
                &segments(&[(0, 5), (10, 5)]),
                &probe,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            FfkitError::Plan(PlanError::SegmentOrder { index: 1, .. })
        ));
        assert_eq!(probe.calls.get(), 0);
    }

    #[test]
    fn test_plan_probes_once() {
        let probe = FixedProbe::new(2_128_000);
        let plan = planner()
            .plan(Path::new("a.mkv"), Path::new("export"), &segments(&[(0, 5), (6, 9)]), &probe)
            .unwrap();
        assert_eq!(probe.calls.get(), 1);
        assert_eq!(plan.target_bitrate, 2_000_000);
    }

    #[test]
    fn test_plan_rejects_low_bitrate() {
        let probe = FixedProbe::new(100_000);
        let err = planner()
            .plan(Path::new("a.mkv"), Path::new("export"), &segments(&[(0, 5)]), &probe)
            .unwrap_err();
        assert!(matches!(
            err,
            FfkitError::Plan(PlanError::NonPositiveBitrate { .. })
        ));
    }
}
