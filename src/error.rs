//! Error handling for media-embed
//!
//! Every failure is fatal for the current run. Errors name the offending
//! path or parameter so the developer can fix the input and re-run.

use thiserror::Error;

/// Result type alias for media-embed operations
pub type Result<T> = std::result::Result<T, MediaError>;

/// Main error type for media-embed operations
#[derive(Error, Debug)]
pub enum MediaError {
    // Input Errors
    #[error("Input not found: {path}")]
    InputNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Failed to decode {path}: {reason}")]
    DecodeFailure {
        path: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Output Errors
    #[error("Failed to write {path}")]
    WriteFailure {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // Parameter Errors
    #[error("Invalid parameter: {param} = {value} (valid range: {range})")]
    InvalidParameter {
        param: &'static str,
        value: String,
        range: &'static str,
    },

    #[error("Invalid frame name '{name}': {reason}")]
    InvalidFrameName { name: String, reason: String },

    #[error("Invalid symbol name '{name}': must be a C identifier")]
    InvalidSymbol { name: String },

    #[error("Cannot convert {from}-channel audio to {to} channels")]
    UnsupportedChannelConversion { from: usize, to: usize },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MediaError {
    /// Build a `WriteFailure` for `path` from any underlying error
    pub fn write_failure<E>(path: &std::path::Path, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        MediaError::WriteFailure {
            path: path.display().to_string(),
            source: source.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MediaError::InputNotFound { .. } => "INPUT_NOT_FOUND",
            MediaError::DecodeFailure { .. } => "DECODE_FAILURE",
            MediaError::WriteFailure { .. } => "WRITE_FAILURE",
            MediaError::InvalidParameter { .. } => "INVALID_PARAMETER",
            MediaError::InvalidFrameName { .. } => "INVALID_FRAME_NAME",
            MediaError::InvalidSymbol { .. } => "INVALID_SYMBOL",
            MediaError::UnsupportedChannelConversion { .. } => "UNSUPPORTED_CHANNELS",
            MediaError::Io(_) => "IO_ERROR",
            MediaError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            MediaError::InputNotFound { .. } => vec![
                "Check the path is correct relative to the working directory",
                "Run from the directory that contains the media assets",
            ],
            MediaError::DecodeFailure { .. } => vec![
                "Check if the file plays in another application",
                "Supported formats: MP3, WAV, FLAC, OGG Vorbis, AAC/MP4",
            ],
            MediaError::InvalidFrameName { .. } => vec![
                "Numeric ordering expects names like 'frame_12.png'",
                "Use lexicographic ordering for other naming schemes",
            ],
            MediaError::InvalidSymbol { .. } => vec![
                "Use only ASCII letters, digits and '_', not starting with a digit",
            ],
            MediaError::UnsupportedChannelConversion { .. } => vec![
                "Convert to mono first, or keep the source channel count",
            ],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = MediaError::InputNotFound {
            path: "song.mp3".to_string(),
            source: None,
        };
        assert_eq!(err.error_code(), "INPUT_NOT_FOUND");
        assert!(err.to_string().contains("song.mp3"));
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = MediaError::InvalidFrameName {
            name: "cover.png".to_string(),
            reason: "missing '_' separator".to_string(),
        };
        assert!(!err.recovery_suggestions().is_empty());

        let err = MediaError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_write_failure_names_path() {
        let err = MediaError::write_failure(
            std::path::Path::new("out/wave.c"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.error_code(), "WRITE_FAILURE");
        assert!(err.to_string().contains("out/wave.c"));
    }
}
