//! Enhancement through an external ffmpeg process.
//!
//! Same contract as the native pipeline: 16-bit WAV in, 16-bit WAV out with
//! the input's sample rate and channel count, plus metrics. The filter graph
//! adds spectral denoising and compression that the native chain lacks.

use crate::audio::format::AudioFormat;
use crate::audio::wav;
use crate::defaults;
use crate::enhance::command::{CommandExecutor, SystemCommandExecutor};
use crate::enhance::pipeline::Metrics;
use crate::enhance::{Enhanced, Enhancer};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Filters applied in order: rumble cut, loudness, denoise, compression,
/// presence boost.
pub const FILTER_GRAPH: &str = "highpass=f=85,\
loudnorm=I=-16:LRA=11:TP=-1.5,\
afftdn=nr=10:nf=-25,\
acompressor=threshold=0.089:ratio=9:attack=0.003:release=0.086:makeup=2,\
equalizer=f=2000:width_type=h:width=1000:g=2";

/// External enhancer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalConfig {
    /// Program to run (name on PATH or absolute path).
    pub program: String,
    /// Seconds before the process is killed.
    pub timeout_secs: u64,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            program: defaults::EXTERNAL_PROGRAM.to_string(),
            timeout_secs: defaults::EXTERNAL_TIMEOUT_SECS,
        }
    }
}

impl ExternalConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builds the ffmpeg argument list for one conversion.
pub fn ffmpeg_args(input: &Path, output: &Path, format: &AudioFormat) -> Vec<String> {
    vec![
        "-hide_banner".to_string(),
        "-nostdin".to_string(),
        "-y".to_string(),
        "-i".to_string(),
        input.display().to_string(),
        "-af".to_string(),
        FILTER_GRAPH.to_string(),
        "-ar".to_string(),
        format.sample_rate.to_string(),
        "-ac".to_string(),
        format.channels.to_string(),
        "-c:a".to_string(),
        "pcm_s16le".to_string(),
        output.display().to_string(),
    ]
}

/// Enhancer that delegates processing to ffmpeg.
pub struct ExternalEnhancer<E: CommandExecutor> {
    executor: E,
    config: ExternalConfig,
}

impl<E: CommandExecutor> ExternalEnhancer<E> {
    pub fn new(executor: E, config: ExternalConfig) -> Self {
        Self { executor, config }
    }
}

impl ExternalEnhancer<SystemCommandExecutor> {
    /// Create an enhancer that runs the real program.
    pub fn system(config: ExternalConfig) -> Self {
        Self::new(SystemCommandExecutor::new(), config)
    }
}

#[async_trait]
impl<E: CommandExecutor> Enhancer for ExternalEnhancer<E> {
    async fn enhance(&self, input: &[u8]) -> Result<Enhanced> {
        let (format, before) = wav::decode(input)?;
        format.ensure_processable()?;

        let scratch = tempfile::tempdir()?;
        let input_path = scratch.path().join("input.wav");
        let output_path = scratch.path().join("enhanced.wav");
        tokio::fs::write(&input_path, input).await?;

        let args = ffmpeg_args(&input_path, &output_path, &format);
        debug!(program = %self.config.program, ?args, "running external enhancer");
        let output = self
            .executor
            .execute(&self.config.program, &args, self.config.timeout())
            .await?;
        if !output.stderr.trim().is_empty() {
            debug!(stderr = %output.stderr.trim(), "external enhancer diagnostics");
        }

        let written = tokio::fs::read(&output_path).await?;
        let (out_format, after) = wav::decode(&written)?;
        out_format.ensure_processable()?;
        // Drop tool-specific chunks (LIST/INFO) behind the canonical header.
        let enhanced = wav::encode(&out_format, &after)?;
        let metrics = Metrics::compare(&out_format, &before, &after);
        info!(
            rms_before = metrics.rms_before,
            rms_after = metrics.rms_after,
            "external enhancement finished"
        );

        Ok(Enhanced {
            wav: enhanced,
            metrics,
        })
    }

    fn name(&self) -> &'static str {
        "external"
    }
}
