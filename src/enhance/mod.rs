//! Enhancement engines.
//!
//! Both engines honour one contract: WAV bytes in, WAV bytes out, plus
//! [`Metrics`]. Callers pick one through [`build_enhancer`] and treat them
//! interchangeably.

pub mod command;
pub mod external;
pub mod pipeline;

pub use command::{CommandExecutor, CommandOutput, SystemCommandExecutor};
pub use external::{ExternalConfig, ExternalEnhancer};
pub use pipeline::{EnhancementPipeline, Metrics, PipelineConfig, StageLevel};

use crate::audio::wav;
use crate::config::{Config, Engine};
use crate::error::{Result, VocaliftError};
use async_trait::async_trait;

/// Output of one enhancement request.
#[derive(Debug, Clone, PartialEq)]
pub struct Enhanced {
    /// Canonical 16-bit PCM WAV file.
    pub wav: Vec<u8>,
    pub metrics: Metrics,
}

/// Trait for enhancement engines.
#[async_trait]
pub trait Enhancer: Send + Sync {
    /// Enhance a complete WAV file held in memory.
    async fn enhance(&self, wav: &[u8]) -> Result<Enhanced>;

    /// Name for logging/diagnostics.
    fn name(&self) -> &'static str;
}

/// In-process engine: decode, run the filter pipeline, encode.
#[derive(Debug, Clone, Default)]
pub struct NativeEnhancer {
    pipeline: EnhancementPipeline,
}

impl NativeEnhancer {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            pipeline: EnhancementPipeline::new(config),
        }
    }

    /// Synchronous form of [`Enhancer::enhance`].
    pub fn enhance_bytes(&self, input: &[u8]) -> Result<Enhanced> {
        let (format, samples) = wav::decode(input)?;
        let (processed, metrics) = self.pipeline.process(samples, &format)?;
        let wav = wav::encode(&format, &processed)?;
        Ok(Enhanced { wav, metrics })
    }
}

#[async_trait]
impl Enhancer for NativeEnhancer {
    async fn enhance(&self, input: &[u8]) -> Result<Enhanced> {
        // CPU-bound: keep it off the async workers.
        let engine = self.clone();
        let input = input.to_vec();
        tokio::task::spawn_blocking(move || engine.enhance_bytes(&input))
            .await
            .map_err(|e| VocaliftError::Other(format!("Enhancement task failed: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "native"
    }
}

/// Build the engine selected by the configuration.
pub fn build_enhancer(config: &Config) -> Box<dyn Enhancer> {
    match config.engine {
        Engine::Native => Box::new(NativeEnhancer::new(config.pipeline)),
        Engine::External => Box::new(ExternalEnhancer::system(config.external.clone())),
    }
}
