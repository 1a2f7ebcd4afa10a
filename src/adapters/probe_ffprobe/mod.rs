//! FFprobe adapter for reading a source's container bit rate

use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::ProbeError;
use crate::ports::BitrateProbe;

/// Subset of `ffprobe -show_format -print_format json` output
#[derive(Debug, Deserialize)]
struct ProbeReport {
    format: FormatSection,
}

#[derive(Debug, Deserialize)]
struct FormatSection {
    bit_rate: BitRateField,
}

/// ffprobe prints `bit_rate` as a string; accept a bare number too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BitRateField {
    Text(String),
    Number(u64),
}

/// Extract the container bit rate from ffprobe JSON output
pub fn parse_probe_output(stdout: &[u8]) -> Result<u64, ProbeError> {
    let report: ProbeReport =
        serde_json::from_slice(stdout).map_err(|e| ProbeError::MalformedResponse {
            reason: e.to_string(),
        })?;

    match report.format.bit_rate {
        BitRateField::Number(value) => Ok(value),
        BitRateField::Text(text) => {
            text.trim()
                .parse::<u64>()
                .map_err(|e| ProbeError::MalformedResponse {
                    reason: format!("bit_rate '{}' is not an integer: {}", text, e),
                })
        }
    }
}

/// FFprobe-based probe adapter
#[derive(Debug, Clone)]
pub struct FfprobeAdapter {
    program: String,
}

impl FfprobeAdapter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl BitrateProbe for FfprobeAdapter {
    fn probe_bitrate(&self, source: &Path) -> Result<u64, ProbeError> {
        debug!(program = %self.program, source = %source.display(), "running probe");

        let output = Command::new(&self.program)
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(source)
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                program: self.program.clone(),
                path: source.to_path_buf(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_probe_output(&output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_bit_rate() {
        let json = br#"{"format": {"filename": "a.mkv", "duration": "12.5", "bit_rate": "5000000"}}"#;
        assert_eq!(parse_probe_output(json).unwrap(), 5_000_000);
    }

    #[test]
    fn test_parse_numeric_bit_rate() {
        let json = br#"{"format": {"bit_rate": 320000}}"#;
        assert_eq!(parse_probe_output(json).unwrap(), 320_000);
    }

    #[test]
    fn test_parse_missing_bit_rate() {
        let json = br#"{"format": {"filename": "a.mkv"}}"#;
        assert!(matches!(
            parse_probe_output(json),
            Err(ProbeError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_parse_missing_format_section() {
        assert!(matches!(
            parse_probe_output(b"{}"),
            Err(ProbeError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_parse_non_numeric_bit_rate() {
        let json = br#"{"format": {"bit_rate": "N/A"}}"#;
        let err = parse_probe_output(json).unwrap_err();
        assert!(err.to_string().contains("N/A"));
    }

    #[test]
    fn test_probe_missing_program_is_spawn_error() {
        let adapter = FfprobeAdapter::new("ffkit-test-no-such-ffprobe");
        assert!(matches!(
            adapter.probe_bitrate(Path::new("a.mkv")),
            Err(ProbeError::Spawn { .. })
        ));
    }
}
