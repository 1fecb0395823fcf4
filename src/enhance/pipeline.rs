//! Fixed-order enhancement pipeline.
//!
//! high-pass → noise-smooth → peak-equalizer → normalize
//!
//! Each stage can be switched off, which removes it from the sequence without
//! reordering the rest. Normalization always runs last so it measures the
//! signal the other stages produced.

use crate::audio::format::AudioFormat;
use crate::audio::level::{calculate_rms, duration_secs};
use crate::defaults;
use crate::dsp::FilterStage;
use crate::error::{Result, VocaliftError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Per-request stage switches and parameters.
///
/// Equalizer coefficients are fixed and not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub high_pass: bool,
    pub high_pass_cutoff_hz: f64,
    pub noise_smooth: bool,
    pub smoothing_window: usize,
    pub equalizer: bool,
    pub normalize: bool,
    pub target_level: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            high_pass: true,
            high_pass_cutoff_hz: defaults::HIGH_PASS_CUTOFF_HZ,
            noise_smooth: true,
            smoothing_window: defaults::SMOOTHING_WINDOW,
            equalizer: true,
            normalize: true,
            target_level: defaults::TARGET_LEVEL,
        }
    }
}

impl PipelineConfig {
    /// Configuration with every stage disabled.
    pub fn passthrough() -> Self {
        Self {
            high_pass: false,
            noise_smooth: false,
            equalizer: false,
            normalize: false,
            ..Self::default()
        }
    }

    /// Checks the parameters of enabled stages against the stream format.
    ///
    /// Only a cutoff that cannot define a filter is an error. Unusual but
    /// computable settings are logged and processed as given.
    pub fn validate(&self, format: &AudioFormat) -> Result<()> {
        if self.high_pass {
            let cutoff = self.high_pass_cutoff_hz;
            if !(cutoff.is_finite() && cutoff > 0.0) {
                return Err(VocaliftError::ConfigInvalidValue {
                    key: "high_pass_cutoff_hz".to_string(),
                    message: format!("{cutoff} is not a positive frequency"),
                });
            }
            if cutoff >= format.nyquist_hz() {
                warn!(
                    cutoff_hz = cutoff,
                    nyquist_hz = format.nyquist_hz(),
                    "high-pass cutoff is at or above Nyquist"
                );
            }
        }
        if self.noise_smooth && self.smoothing_window <= 1 {
            warn!(
                window = self.smoothing_window,
                "smoothing window below 2 leaves the signal unchanged"
            );
        }
        if self.normalize && !(self.target_level > 0.0 && self.target_level <= 1.0) {
            warn!(
                target_level = self.target_level,
                "target level outside (0, 1]; gain is still clamped to [0.1, 8]"
            );
        }
        Ok(())
    }

    /// Enabled stages in execution order.
    pub fn stages(&self) -> Vec<FilterStage> {
        let mut stages = Vec::with_capacity(4);
        if self.high_pass {
            stages.push(FilterStage::HighPass {
                cutoff_hz: self.high_pass_cutoff_hz,
            });
        }
        if self.noise_smooth {
            stages.push(FilterStage::NoiseSmooth {
                window: self.smoothing_window,
            });
        }
        if self.equalizer {
            stages.push(FilterStage::PeakEqualizer);
        }
        if self.normalize {
            stages.push(FilterStage::Normalize {
                target_level: self.target_level,
            });
        }
        stages
    }
}

/// RMS observed after one executed stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageLevel {
    pub stage: String,
    pub rms: f64,
}

/// Observations of one enhancement run. Never fed back into processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub rms_before: f64,
    pub rms_after: f64,
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub sample_count: usize,
    /// Executed stages in order. Empty when every stage is disabled.
    #[serde(default)]
    pub stages: Vec<StageLevel>,
}

impl Metrics {
    /// Metrics for a before/after pair without per-stage detail.
    pub fn compare(format: &AudioFormat, before: &[i16], after: &[i16]) -> Self {
        Self {
            rms_before: calculate_rms(before),
            rms_after: calculate_rms(after),
            duration_secs: duration_secs(after.len(), format),
            sample_rate: format.sample_rate,
            channels: format.channels,
            sample_count: after.len(),
            stages: Vec::new(),
        }
    }
}

/// Runs the configured stages over one buffer.
#[derive(Debug, Clone, Default)]
pub struct EnhancementPipeline {
    config: PipelineConfig,
}

impl EnhancementPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Enhances `samples` and reports before/after levels.
    ///
    /// Format and configuration are checked before any stage executes; on
    /// error nothing is processed.
    pub fn process(&self, samples: Vec<i16>, format: &AudioFormat) -> Result<(Vec<i16>, Metrics)> {
        format.ensure_processable()?;
        self.config.validate(format)?;

        let rms_before = calculate_rms(&samples);
        debug!(rms = rms_before, samples = samples.len(), "input level");

        let mut levels = Vec::new();
        let mut buffer = samples;
        for stage in self.config.stages() {
            buffer = stage.apply(buffer, format);
            let rms = calculate_rms(&buffer);
            debug!(stage = %stage, rms, "stage complete");
            levels.push(StageLevel {
                stage: stage.name().to_string(),
                rms,
            });
        }

        let rms_after = levels.last().map_or(rms_before, |level| level.rms);
        info!(
            rms_before,
            rms_after,
            stages = levels.len(),
            "enhancement finished"
        );

        let metrics = Metrics {
            rms_before,
            rms_after,
            duration_secs: duration_secs(buffer.len(), format),
            sample_rate: format.sample_rate,
            channels: format.channels,
            sample_count: buffer.len(),
            stages: levels,
        };
        Ok((buffer, metrics))
    }
}
