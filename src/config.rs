//! Configuration for the capture pipeline
//!
//! Settings are read from a JSON file. Every field has a default, so a
//! missing file or a partial file is fine.

use crate::recorder::state::VideoQuality;
use crate::utils::error::{CaptureError, CaptureResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "CAPTURE_INGEST_CONFIG";

/// Capture pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureConfig {
    /// Window in which repeated record presses collapse into one
    pub debounce_ms: u64,

    /// Duration timer tick
    pub timer_tick_ms: u64,

    /// Picked video rotation must be a multiple of this
    pub rotation_modulus: i32,

    /// Recording quality requested on Android
    pub android_quality: VideoQuality,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            timer_tick_ms: 1000,
            rotation_modulus: 180,
            android_quality: VideoQuality::P720,
        }
    }
}

impl CaptureConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timer_tick(&self) -> Duration {
        Duration::from_millis(self.timer_tick_ms)
    }

    /// Read settings from a JSON file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> CaptureResult<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: CaptureConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject settings the recorder cannot run with
    pub fn validate(&self) -> CaptureResult<()> {
        if self.timer_tick_ms == 0 {
            return Err(CaptureError::InvalidConfig(
                "timerTickMs must be greater than zero".to_string(),
            ));
        }
        if self.rotation_modulus <= 0 {
            return Err(CaptureError::InvalidConfig(format!(
                "rotationModulus must be positive, got {}",
                self.rotation_modulus
            )));
        }
        Ok(())
    }

    /// Read settings from the file named by `CAPTURE_INGEST_CONFIG`
    pub fn from_env() -> CaptureResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> CaptureResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = CaptureConfig::load(&dir.path().join("capture.json")).unwrap();
        assert_eq!(config, CaptureConfig::default());
        assert_eq!(config.debounce_window(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("capture.json");
        fs::write(&path, r#"{ "debounceMs": 300, "androidQuality": "1080p" }"#).unwrap();

        let config = CaptureConfig::load(&path).unwrap();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.android_quality, VideoQuality::P1080);
        assert_eq!(config.timer_tick_ms, 1000);
        assert_eq!(config.rotation_modulus, 180);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("capture.json");
        let config = CaptureConfig {
            timer_tick_ms: 250,
            ..CaptureConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(CaptureConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_zero_timer_tick_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("capture.json");
        fs::write(&path, r#"{ "timerTickMs": 0 }"#).unwrap();

        let err = CaptureConfig::load(&path).unwrap_err();
        assert!(matches!(err, CaptureError::InvalidConfig(_)));
    }

    #[test]
    fn test_non_positive_rotation_modulus_is_rejected() {
        let config = CaptureConfig {
            rotation_modulus: 0,
            ..CaptureConfig::default()
        };
        assert!(matches!(config.validate(), Err(CaptureError::InvalidConfig(_))));
        assert!(CaptureConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("capture.json");
        fs::write(&path, "not json").unwrap();
        assert!(CaptureConfig::load(&path).is_err());
    }
}
