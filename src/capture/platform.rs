//! Platform capability strategies
//!
//! Ratio lookup and rotation checks differ between the two platform
//! families. Both are selected once from a [`PlatformProfile`] at startup.

use super::ratio::{parse_ratios, SupportedRatio};
use super::traits::{CaptureDevice, OrientationLock};
use crate::config::CaptureConfig;
use crate::recorder::state::RecordingConfig;
use crate::utils::error::CaptureResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Platform family the app runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

/// Capability descriptor of the running device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformProfile {
    pub platform: Platform,
    pub is_tablet: bool,
}

impl PlatformProfile {
    pub fn android() -> Self {
        Self {
            platform: Platform::Android,
            is_tablet: false,
        }
    }

    pub fn ios(is_tablet: bool) -> Self {
        Self {
            platform: Platform::Ios,
            is_tablet,
        }
    }

    /// Landscape side matching the camera sensor mounting
    pub fn landscape_lock(&self) -> OrientationLock {
        match self.platform {
            Platform::Android => OrientationLock::LandscapeLeft,
            Platform::Ios => OrientationLock::LandscapeRight,
        }
    }

    /// Whether picked videos carry rotation metadata worth checking
    pub fn reports_rotation(&self) -> bool {
        self.platform == Platform::Android
    }

    /// Recorder settings; only Android takes a quality hint
    pub fn recording_config(&self, config: &CaptureConfig) -> RecordingConfig {
        match self.platform {
            Platform::Android => RecordingConfig {
                quality: Some(config.android_quality),
            },
            Platform::Ios => RecordingConfig { quality: None },
        }
    }

    /// Ratio lookup strategy for this platform
    pub fn ratio_source(&self, device: Arc<dyn CaptureDevice>) -> Arc<dyn RatioSource> {
        match self.platform {
            Platform::Android => Arc::new(DeviceRatioQuery::new(device)),
            Platform::Ios => Arc::new(FixedRatioTable::for_tablet(self.is_tablet)),
        }
    }

    /// Rotation check strategy for this platform
    pub fn rotation_policy(&self, config: &CaptureConfig) -> Arc<dyn RotationPolicy> {
        if self.reports_rotation() {
            Arc::new(RotationChecked {
                modulus: config.rotation_modulus,
            })
        } else {
            Arc::new(RotationIgnored)
        }
    }
}

/// Source of the ratios the camera supports
#[async_trait]
pub trait RatioSource: Send + Sync {
    async fn supported_ratios(&self) -> CaptureResult<Vec<SupportedRatio>>;
}

/// Fixed ratio table for devices that cannot be queried
#[derive(Debug, Clone)]
pub struct FixedRatioTable {
    ratios: Vec<SupportedRatio>,
}

impl FixedRatioTable {
    /// Both orientations of `n1:n2`
    pub fn new(n1: u32, n2: u32) -> Self {
        Self {
            ratios: vec![SupportedRatio::new(n1, n2), SupportedRatio::new(n2, n1)],
        }
    }

    pub fn for_tablet(is_tablet: bool) -> Self {
        if is_tablet {
            Self::new(3, 4)
        } else {
            Self::new(9, 16)
        }
    }
}

#[async_trait]
impl RatioSource for FixedRatioTable {
    async fn supported_ratios(&self) -> CaptureResult<Vec<SupportedRatio>> {
        Ok(self.ratios.clone())
    }
}

/// Live query against the capture device
pub struct DeviceRatioQuery {
    device: Arc<dyn CaptureDevice>,
}

impl DeviceRatioQuery {
    pub fn new(device: Arc<dyn CaptureDevice>) -> Self {
        Self { device }
    }
}

#[async_trait]
impl RatioSource for DeviceRatioQuery {
    async fn supported_ratios(&self) -> CaptureResult<Vec<SupportedRatio>> {
        let raw = self.device.supported_ratios().await?;
        let ratios = parse_ratios(&raw);
        tracing::debug!("Device reports {} capture ratios", ratios.len());
        Ok(ratios)
    }
}

/// Check applied to rotation metadata of picked videos
pub trait RotationPolicy: Send + Sync {
    /// Returns the offending rotation when it is not landscape
    fn non_landscape(&self, rotation_degrees: Option<i32>) -> Option<i32>;
}

/// Rejects rotations that are not a multiple of `modulus`
#[derive(Debug, Clone, Copy)]
pub struct RotationChecked {
    pub modulus: i32,
}

impl RotationPolicy for RotationChecked {
    fn non_landscape(&self, rotation_degrees: Option<i32>) -> Option<i32> {
        // Missing metadata counts as unrotated
        let degrees = rotation_degrees.unwrap_or(0);
        if self.modulus != 0 && degrees.rem_euclid(self.modulus) != 0 {
            Some(degrees)
        } else {
            None
        }
    }
}

/// Platforms whose picker already normalises rotation
#[derive(Debug, Clone, Copy)]
pub struct RotationIgnored;

impl RotationPolicy for RotationIgnored {
    fn non_landscape(&self, _rotation_degrees: Option<i32>) -> Option<i32> {
        None
    }
}
