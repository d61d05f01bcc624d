//! pm-assistant configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::{CaptureOptions, DEFAULT_FILENAME};

/// Main pm-assistant configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the PDF is written to
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,

    /// PDF file name
    pub filename: String,

    /// Pixel density multiplier for the raster capture
    #[serde(rename = "capture-scale")]
    pub capture_scale: u32,

    /// Leave unpainted cells transparent instead of white
    #[serde(rename = "preserve-background")]
    pub preserve_background: bool,

    /// UI tick interval in milliseconds
    #[serde(rename = "tick-rate-ms")]
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            filename: DEFAULT_FILENAME.to_string(),
            capture_scale: 2,
            preserve_background: true,
            tick_rate_ms: 250,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .pm-assistant.yml
        let local_config = PathBuf::from(".pm-assistant.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/pm-assistant/pm-assistant.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("pm-assistant").join("pm-assistant.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}",
                            user_config.display(),
                            e
                        );
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Capture settings for the export pipeline
    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            scale: self.capture_scale,
            preserve_background: self.preserve_background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.filename, "AI-PM-Plan.pdf");
        assert_eq!(config.capture_scale, 2);
        assert!(config.preserve_background);
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.capture_options(), CaptureOptions::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pm-assistant.yml");
        fs::write(&path, "output-dir: /tmp/plans\ncapture-scale: 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/plans"));
        assert_eq!(config.capture_scale, 3);
        assert_eq!(config.filename, DEFAULT_FILENAME);
        assert!(config.preserve_background);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "capture-scale: [not a number\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_yaml_round_trip_uses_kebab_keys() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("output-dir"));
        assert!(yaml.contains("preserve-background"));
        assert!(yaml.contains("tick-rate-ms"));
    }
}
