//! Error types for the style subsystem.

use thiserror::Error;

// ============================================================================
// Load Errors
// ============================================================================

/// Errors raised while reading a style resource.
#[derive(Error, Debug)]
pub enum StyleLoadError {
    /// The resource could not be read.
    #[error("failed to read style file '{path}': {message}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Description of the I/O error.
        message: String,
        /// Underlying I/O error.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The resource was read but is not valid JSON or YAML.
    #[error("style parse error in '{file}' at line {line}: {message}")]
    Parse {
        /// File path or identifier where the error occurred.
        file: String,
        /// Line number where the error occurred (0 if unknown).
        line: usize,
        /// Description of the parse error.
        message: String,
    },

    /// The file extension is neither JSON nor YAML.
    #[error("unsupported style file format: '{path}'")]
    UnsupportedFormat {
        /// Path to the rejected file.
        path: String,
    },

    /// No entry is marked as the wheel centre.
    #[error("style resource '{file}' has no default style")]
    MissingDefault {
        /// File path or identifier of the resource.
        file: String,
    },
}

impl StyleLoadError {
    /// Create a new Io error.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a new Parse error.
    pub fn parse(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Line number for parse errors, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } if *line > 0 => Some(*line),
            _ => None,
        }
    }
}
