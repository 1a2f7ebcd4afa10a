// Cut interactor - Joins configured segments into one re-encoded file

use std::path::PathBuf;

use tracing::info;

use crate::app::read_segments;
use crate::domain::model::GraphPlan;
use crate::error::FfkitResult;
use crate::planner::ConcatPlanner;
use crate::ports::BitrateProbe;

/// Inputs of the cut use case
#[derive(Debug, Clone)]
pub struct CutRequest {
    pub source: PathBuf,
    pub config: PathBuf,
    pub dest_dir: PathBuf,
    /// Known source bit rate, skips the probe when set
    pub source_bitrate: Option<u64>,
}

/// Interactor for the trim-and-concat use case
pub struct CutInteractor<'a> {
    probe: &'a dyn BitrateProbe,
    planner: ConcatPlanner,
}

impl<'a> CutInteractor<'a> {
    pub fn new(probe: &'a dyn BitrateProbe, planner: ConcatPlanner) -> Self {
        Self { probe, planner }
    }

    /// Parse the config and build the graph plan
    pub fn plan(&self, request: &CutRequest) -> FfkitResult<GraphPlan> {
        let segments = read_segments(&request.config)?;

        let plan = match request.source_bitrate {
            Some(bitrate) => {
                info!(bitrate, "using given source bit rate");
                self.planner.plan_with_bitrate(
                    &request.source,
                    &request.dest_dir,
                    &segments,
                    bitrate,
                )?
            }
            None => self
                .planner
                .plan(&request.source, &request.dest_dir, &segments, self.probe)?,
        };

        info!(
            output = %plan.command.output_path.display(),
            encoder = %self.planner.profile().codec,
            target_bitrate = plan.target_bitrate,
            "planned cut"
        );
        Ok(plan)
    }
}
