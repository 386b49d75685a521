//! Export Writer
//!
//! Saves a finished batch of jokes as a timestamped `.txt` or `.pdf` file.

mod pdf;
mod text;

pub use pdf::{render_pdf, wrap_line, WRAP_COLUMNS};
pub use text::render_text;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};
use thiserror::Error;

pub const EXPORT_TITLE: &str = "🎭 Dark Comedy Jokes 🎭";
const FILE_STEM: &str = "dark_comedy_jokes";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported format '{0}'")]
    UnsupportedFormat(String),

    #[error("failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// `dark_comedy_jokes_YYYYMMDD_HHMMSS.<ext>`
pub fn export_filename(format: ExportFormat, at: &DateTime<Local>) -> String {
    format!(
        "{}_{}.{}",
        FILE_STEM,
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Human-readable timestamp used in file footers.
pub fn footer_line(at: &DateTime<Local>) -> String {
    format!("Generated on: {}", at.format("%Y-%m-%d %H:%M:%S"))
}

/// Write the jokes into `dir` (created if missing) and return the path.
pub fn export_jokes(jokes: &[String], format: ExportFormat, dir: &Path) -> Result<PathBuf, ExportError> {
    export_jokes_at(jokes, format, dir, &Local::now())
}

/// [`export_jokes`] with an explicit timestamp.
pub fn export_jokes_at(
    jokes: &[String],
    format: ExportFormat,
    dir: &Path,
    at: &DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let path = dir.join(export_filename(format, at));
    let bytes = match format {
        ExportFormat::Text => render_text(jokes, at).into_bytes(),
        ExportFormat::Pdf => render_pdf(jokes, at)?,
    };

    std::fs::write(&path, bytes).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    log::info!("Exported {} jokes to {}", jokes.len(), path.display());
    Ok(path)
}

/// Export by format tag, reporting the outcome as a string: the written
/// path on success, `"Error: ..."` otherwise.
pub fn save_output(jokes: &[String], format: &str, dir: &Path) -> String {
    let result = format
        .parse::<ExportFormat>()
        .and_then(|fmt| export_jokes(jokes, fmt, dir));

    match result {
        Ok(path) => path.display().to_string(),
        Err(e) => {
            log::warn!("Export failed: {e}");
            format!("Error: {e}")
        }
    }
}
