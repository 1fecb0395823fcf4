//! Command-line interface for vocalift
//!
//! Provides argument parsing using clap derive macros.

use crate::config::{Config, Engine};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Clean up voice recordings: rumble filter, denoise, clarity EQ, loudness
#[derive(Parser, Debug)]
#[command(name = "vocalift", version, about = "Enhance voice recordings (16-bit PCM WAV)")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: per-stage levels, -vv: full diagnostics)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enhance a recording
    Enhance(EnhanceArgs),

    /// Show format, duration and level of a WAV file
    Inspect {
        /// WAV file to inspect ("-" for stdin)
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Arguments of the `enhance` command.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct EnhanceArgs {
    /// WAV file to enhance ("-" for stdin)
    pub input: PathBuf,

    /// Where to write the enhanced WAV (default: stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Enhancement engine (default: from config, native)
    #[arg(long, value_enum)]
    pub engine: Option<Engine>,

    /// Skip the high-pass rumble filter
    #[arg(long)]
    pub no_high_pass: bool,

    /// Skip moving-average noise smoothing
    #[arg(long)]
    pub no_noise_smooth: bool,

    /// Skip the presence equalizer
    #[arg(long)]
    pub no_equalizer: bool,

    /// Skip loudness normalization
    #[arg(long)]
    pub no_normalize: bool,

    /// High-pass cutoff frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub cutoff: Option<f64>,

    /// Noise smoothing window in samples
    #[arg(long, value_name = "N")]
    pub window: Option<usize>,

    /// Target RMS level, 0 < L ≤ 1
    #[arg(long, value_name = "L")]
    pub target_level: Option<f64>,

    /// External engine timeout. Examples: 60, 90s, 2m
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout_secs)]
    pub timeout: Option<u64>,

    /// Print metrics as JSON
    #[arg(long)]
    pub json: bool,
}

impl EnhanceArgs {
    /// Apply command-line overrides on top of file and env configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(engine) = self.engine {
            config.engine = engine;
        }
        let pipeline = &mut config.pipeline;
        if self.no_high_pass {
            pipeline.high_pass = false;
        }
        if self.no_noise_smooth {
            pipeline.noise_smooth = false;
        }
        if self.no_equalizer {
            pipeline.equalizer = false;
        }
        if self.no_normalize {
            pipeline.normalize = false;
        }
        if let Some(cutoff) = self.cutoff {
            pipeline.high_pass_cutoff_hz = cutoff;
        }
        if let Some(window) = self.window {
            pipeline.smoothing_window = window;
        }
        if let Some(level) = self.target_level {
            pipeline.target_level = level;
        }
        if let Some(secs) = self.timeout {
            config.external.timeout_secs = secs;
        }
    }
}

/// Parse a timeout string into seconds.
///
/// Supports any duration format accepted by `humantime`: bare numbers (seconds),
/// single-unit (`30s`, `5m`), and compound (`1m30s`).
fn parse_timeout_secs(s: &str) -> Result<u64, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_secs())
        .map_err(|e| e.to_string())
}

/// Configuration actions
#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigAction {
    /// Print the effective configuration (file + env overrides)
    Show,
    /// Print the configuration file path
    Path,
}
