// Split interactor - One stream-copied file per configured segment

use std::path::PathBuf;

use tracing::info;

use crate::app::read_segments;
use crate::domain::model::TrimPlanList;
use crate::error::FfkitResult;
use crate::planner::SplitPlanner;

/// Inputs of the split use case
#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub source: PathBuf,
    pub config: PathBuf,
    pub dest_dir: PathBuf,
}

/// Interactor for the independent-trim use case
pub struct SplitInteractor {
    planner: SplitPlanner,
}

impl SplitInteractor {
    pub fn new(planner: SplitPlanner) -> Self {
        Self { planner }
    }

    /// Parse the config and build one command per segment
    pub fn plan(&self, request: &SplitRequest) -> FfkitResult<TrimPlanList> {
        let segments = read_segments(&request.config)?;
        let plan = self
            .planner
            .plan(&request.source, &request.dest_dir, &segments)?;
        info!(commands = plan.commands.len(), "planned split");
        Ok(plan)
    }
}
