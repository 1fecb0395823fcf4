use crate::enhance::external::ExternalConfig;
use crate::enhance::pipeline::PipelineConfig;
use crate::error::{Result, VocaliftError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub engine: Engine,
    pub pipeline: PipelineConfig,
    pub external: ExternalConfig,
}

/// Which enhancement engine processes recordings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Engine {
    /// In-process filter pipeline
    #[default]
    Native,
    /// ffmpeg subprocess
    External,
}

impl std::str::FromStr for Engine {
    type Err = VocaliftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "external" | "ffmpeg" => Ok(Self::External),
            other => Err(VocaliftError::ConfigInvalidValue {
                key: "engine".to_string(),
                message: format!("unknown engine '{other}' (expected native or external)"),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(VocaliftError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VOCALIFT_ENGINE → engine
    /// - VOCALIFT_TARGET_LEVEL → pipeline.target_level
    /// - VOCALIFT_HIGH_PASS_CUTOFF → pipeline.high_pass_cutoff_hz
    /// - VOCALIFT_FFMPEG → external.program
    ///
    /// Empty or unparsable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(engine) = std::env::var("VOCALIFT_ENGINE")
            && let Ok(engine) = engine.parse()
        {
            self.engine = engine;
        }

        if let Ok(level) = std::env::var("VOCALIFT_TARGET_LEVEL")
            && let Ok(level) = level.trim().parse()
        {
            self.pipeline.target_level = level;
        }

        if let Ok(cutoff) = std::env::var("VOCALIFT_HIGH_PASS_CUTOFF")
            && let Ok(cutoff) = cutoff.trim().parse()
        {
            self.pipeline.high_pass_cutoff_hz = cutoff;
        }

        if let Ok(program) = std::env::var("VOCALIFT_FFMPEG")
            && !program.is_empty()
        {
            self.external.program = program;
        }

        self
    }

    /// Serialize to TOML for display.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| VocaliftError::ConfigParse {
            message: e.to_string(),
        })
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/vocalift/config.toml on Linux
    #[cfg(feature = "cli")]
    pub fn default_path() -> Result<std::path::PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("vocalift").join("config.toml"))
            .ok_or_else(|| VocaliftError::Other("Could not determine config directory".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that modify environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: These helpers are only used in tests with ENV_LOCK held,
    // ensuring no concurrent access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    fn clear_vocalift_env() {
        remove_env("VOCALIFT_ENGINE");
        remove_env("VOCALIFT_TARGET_LEVEL");
        remove_env("VOCALIFT_HIGH_PASS_CUTOFF");
        remove_env("VOCALIFT_FFMPEG");
    }

    #[test]
    fn test_default_config_has_correct_values() {
        let config = Config::default();

        assert_eq!(config.engine, Engine::Native);
        assert!(config.pipeline.high_pass);
        assert_eq!(config.pipeline.high_pass_cutoff_hz, 85.0);
        assert_eq!(config.pipeline.smoothing_window, 3);
        assert_eq!(config.pipeline.target_level, 0.7);
        assert_eq!(config.external.program, "ffmpeg");
        assert_eq!(config.external.timeout_secs, 60);
    }

    #[test]
    fn test_load_from_toml_file() {
        let toml_content = r#"
            engine = "external"

            [pipeline]
            high_pass = true
            high_pass_cutoff_hz = 100.0
            noise_smooth = false
            smoothing_window = 5
            equalizer = false
            normalize = true
            target_level = 0.5

            [external]
            program = "/usr/local/bin/ffmpeg"
            timeout_secs = 30
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.engine, Engine::External);
        assert_eq!(config.pipeline.high_pass_cutoff_hz, 100.0);
        assert!(!config.pipeline.noise_smooth);
        assert_eq!(config.pipeline.smoothing_window, 5);
        assert!(!config.pipeline.equalizer);
        assert_eq!(config.pipeline.target_level, 0.5);
        assert_eq!(config.external.program, "/usr/local/bin/ffmpeg");
        assert_eq!(config.external.timeout_secs, 30);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let toml_content = r#"
            [pipeline]
            equalizer = false
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert!(!config.pipeline.equalizer);
        assert!(config.pipeline.high_pass);
        assert!(config.pipeline.noise_smooth);
        assert!(config.pipeline.normalize);
        assert_eq!(config.engine, Engine::Native);
        assert_eq!(config.external, ExternalConfig::default());
    }

    #[test]
    fn test_env_override_engine_and_level() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_vocalift_env();

        set_env("VOCALIFT_ENGINE", "ffmpeg");
        set_env("VOCALIFT_TARGET_LEVEL", "0.4");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.engine, Engine::External);
        assert_eq!(config.pipeline.target_level, 0.4);
        assert_eq!(config.pipeline.high_pass_cutoff_hz, 85.0); // Not overridden

        clear_vocalift_env();
    }

    #[test]
    fn test_env_override_program_and_cutoff() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_vocalift_env();

        set_env("VOCALIFT_FFMPEG", "/opt/ffmpeg");
        set_env("VOCALIFT_HIGH_PASS_CUTOFF", "120");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.external.program, "/opt/ffmpeg");
        assert_eq!(config.pipeline.high_pass_cutoff_hz, 120.0);

        clear_vocalift_env();
    }

    #[test]
    fn test_env_override_invalid_values_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_vocalift_env();

        set_env("VOCALIFT_ENGINE", "turbo");
        set_env("VOCALIFT_TARGET_LEVEL", "loud");
        set_env("VOCALIFT_FFMPEG", "");
        let config = Config::default().with_env_overrides();

        assert_eq!(config, Config::default());

        clear_vocalift_env();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let invalid_toml = r#"
            [pipeline
            target_level = "broken
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_toml.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());

        assert!(matches!(result, Err(VocaliftError::Config(_))));
    }

    #[test]
    fn test_load_or_default_returns_default_for_missing_file() {
        let missing_path = Path::new("/tmp/nonexistent_vocalift_config_12345.toml");
        let config = Config::load_or_default(missing_path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_errors_on_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"engine = [").unwrap();

        assert!(Config::load_or_default(temp_file.path()).is_err());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = Config {
            engine: Engine::External,
            ..Config::default()
        };
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
        assert!(text.contains("engine = \"external\""));
    }

    #[test]
    fn test_engine_from_str() {
        assert_eq!("Native".parse::<Engine>().unwrap(), Engine::Native);
        assert_eq!("external".parse::<Engine>().unwrap(), Engine::External);
        assert!("other".parse::<Engine>().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_default_path_ends_with_vocalift_config() {
        if let Ok(path) = Config::default_path() {
            assert!(path.ends_with("vocalift/config.toml"));
        }
    }
}
