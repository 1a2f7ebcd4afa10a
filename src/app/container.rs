// Application container - Wires adapters and interactors from settings

use crate::adapters::{FfprobeAdapter, ProcessExecutor, Settings};
use crate::app::{CutInteractor, Dispatcher, SplitInteractor};
use crate::domain::model::EncoderProfile;
use crate::planner::{ConcatPlanner, SplitPlanner};

/// Owns the adapters for one invocation
pub struct AppContainer {
    settings: Settings,
    probe: FfprobeAdapter,
    executor: ProcessExecutor,
}

impl AppContainer {
    pub fn new(settings: Settings) -> Self {
        let probe = FfprobeAdapter::new(settings.tools.ffprobe.clone());
        Self {
            settings,
            probe,
            executor: ProcessExecutor::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Encoder profile configured in settings
    pub fn encoder_profile(&self) -> EncoderProfile {
        self.settings.encoder.clone().into()
    }

    pub fn cut_interactor(&self, profile: EncoderProfile, overwrite: bool) -> CutInteractor<'_> {
        let planner =
            ConcatPlanner::new(self.settings.tools.ffmpeg.clone(), profile).with_overwrite(overwrite);
        CutInteractor::new(&self.probe, planner)
    }

    pub fn split_interactor(&self, overwrite: bool) -> SplitInteractor {
        let planner = SplitPlanner::new(self.settings.tools.ffmpeg.clone()).with_overwrite(overwrite);
        SplitInteractor::new(planner)
    }

    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.executor)
    }
}
