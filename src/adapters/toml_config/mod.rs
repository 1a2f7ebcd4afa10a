// TOML config adapter - Tool settings loaded once per invocation

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::model::EncoderProfile;
use crate::error::{FfkitError, FfkitResult};

/// Settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "ffkit.toml";

/// External tool locations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSettings {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

/// Encoder used by the concat plan
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderSettings {
    pub codec: String,
    pub args: Vec<String>,
    pub container: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        let profile = EncoderProfile::default();
        Self {
            codec: profile.codec,
            args: profile.extra_args,
            container: profile.container,
        }
    }
}

impl From<EncoderSettings> for EncoderProfile {
    fn from(settings: EncoderSettings) -> Self {
        EncoderProfile {
            codec: settings.codec,
            extra_args: settings.args,
            container: settings.container,
        }
    }
}

/// Contents of `ffkit.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tools: ToolSettings,
    pub encoder: EncoderSettings,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str, path: &Path) -> FfkitResult<Self> {
        toml::from_str(content).map_err(|source| FfkitError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from an explicit file, or the default file if present
    ///
    /// A missing explicit file is an error, a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> FfkitResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if !fallback.is_file() {
                    debug!("no settings file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| FfkitError::io("failed to read settings file", &path, e))?;
        let settings = Self::from_toml(&content, &path)?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tools.ffmpeg, "ffmpeg");
        assert_eq!(settings.tools.ffprobe, "ffprobe");
        assert_eq!(EncoderProfile::from(settings.encoder), EncoderProfile::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            "[encoder]\ncodec = \"hevc_vaapi\"\nargs = [\"-qp\", \"24\"]\n",
            Path::new("ffkit.toml"),
        )
        .unwrap();

        assert_eq!(settings.tools, ToolSettings::default());
        assert_eq!(settings.encoder.codec, "hevc_vaapi");
        assert_eq!(settings.encoder.args, vec!["-qp", "24"]);
        assert_eq!(settings.encoder.container, "mp4");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Settings::from_toml("[tools]\nffmpge = \"x\"\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, FfkitError::Settings { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tools]\nffmpeg = \"/opt/bin/ffmpeg\"").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.tools.ffmpeg, "/opt/bin/ffmpeg");
        assert_eq!(settings.tools.ffprobe, "ffprobe");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = Settings::load(Some(Path::new("/nonexistent/ffkit.toml"))).unwrap_err();
        assert!(matches!(err, FfkitError::Io { .. }));
    }
}
