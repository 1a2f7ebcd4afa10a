// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod probe_ffprobe;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::ProcessExecutor;
pub use probe_ffprobe::FfprobeAdapter;
pub use toml_config::Settings;
pub use tracing_log::{init_logging, LogFormat};
