use std::fs;
use std::path::Path;

/// Fixed-point rendering used by the tabular artifacts.
pub fn format_fixed_f64(value: f64, precision: usize) -> String {
    format!("{value:.precision$}", precision = precision)
}

/// Canonical line endings and a guaranteed trailing newline, so repeated
/// writes of the same content are byte-identical across platforms.
pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, normalize_text_artifact(content))
}
