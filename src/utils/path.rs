//! Output path derivation

use std::path::{Path, PathBuf};

/// File name of `source` without its extension
pub fn base_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Extension of `source` including the leading dot, or empty
pub fn dotted_extension(source: &Path) -> String {
    source
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// `dest_dir/{stem}.{container}` for the combined output
pub fn with_container(source: &Path, dest_dir: &Path, container: &str) -> PathBuf {
    let container = container.trim_start_matches('.');
    dest_dir.join(format!("{}.{}", base_stem(source), container))
}

/// `dest_dir/{prefix}{stem}-{index}{ext}` for one split output
pub fn indexed_output(source: &Path, dest_dir: &Path, prefix: &str, index: &str) -> PathBuf {
    dest_dir.join(format!(
        "{}{}-{}{}",
        prefix,
        base_stem(source),
        index,
        dotted_extension(source)
    ))
}
