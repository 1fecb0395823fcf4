//! Error types for vocalift.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocaliftError {
    // Container format errors
    #[error("Invalid WAV: not a RIFF container")]
    NotRiff,

    #[error("Invalid WAV: chunk '{tag}' at offset {offset} runs past the end of the buffer")]
    TruncatedChunk { tag: String, offset: usize },

    #[error("Invalid WAV: no fmt chunk before the data chunk")]
    MissingFmtChunk,

    #[error("Invalid WAV: no data chunk")]
    MissingDataChunk,

    #[error("Invalid WAV: data chunk size {size} is not a whole number of 16-bit samples")]
    OddDataSize { size: u32 },

    #[error("Invalid WAV format: {message}")]
    InvalidFormat { message: String },

    #[error("Unsupported bit depth: {bits} (only 16-bit PCM can be enhanced)")]
    UnsupportedBitDepth { bits: u16 },

    // Configuration errors
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // External enhancer errors
    #[error("External tool not found: {tool}")]
    ExternalToolNotFound { tool: String },

    #[error("External tool failed: {message}")]
    ExternalToolFailed { message: String },

    #[error("External tool {tool} timed out after {timeout_secs}s")]
    ExternalToolTimeout { tool: String, timeout_secs: u64 },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl VocaliftError {
    /// Whether this error reports malformed or unsupported input audio.
    ///
    /// Format errors are never worth retrying with the same bytes.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::NotRiff
                | Self::TruncatedChunk { .. }
                | Self::MissingFmtChunk
                | Self::MissingDataChunk
                | Self::OddDataSize { .. }
                | Self::InvalidFormat { .. }
                | Self::UnsupportedBitDepth { .. }
        )
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VocaliftError>;
