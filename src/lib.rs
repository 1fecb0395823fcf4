//! vocalift - Voice recording enhancement
//!
//! Decodes a 16-bit PCM WAV file, runs it through a fixed chain of filters
//! (high-pass, noise smoothing, presence EQ, loudness normalization) and
//! encodes the result, reporting levels before and after.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod config;
pub mod defaults;
pub mod dsp;
pub mod enhance;
pub mod error;

#[cfg(feature = "cli")]
pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod report;

// Codec
pub use audio::{AudioFormat, decode, encode};

// Processing
pub use dsp::FilterStage;
pub use enhance::{
    EnhancementPipeline, Enhanced, Enhancer, ExternalEnhancer, Metrics, NativeEnhancer,
    PipelineConfig, build_enhancer,
};

// Error handling
pub use error::{Result, VocaliftError};

// Config
pub use config::{Config, Engine};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
