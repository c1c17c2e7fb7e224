//! Capture trait definitions
//!
//! Platform-agnostic contracts for the camera, media library and device
//! services the capture pipeline talks to.

use crate::recorder::state::RecordingConfig;
use crate::utils::error::CaptureResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Where a video came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoOrigin {
    /// Produced by this app's own recorder
    Recorder,
    /// Selected from the device library
    Picker,
}

/// A produced or selected video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedVideo {
    /// Local URI of the video file
    pub uri: String,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Rotation reported by the device, absent for freshly recorded video
    pub rotation_degrees: Option<i32>,

    pub origin: VideoOrigin,
}

impl CapturedVideo {
    /// A video produced by the recorder
    pub fn recorded(uri: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            uri: uri.into(),
            width,
            height,
            rotation_degrees: None,
            origin: VideoOrigin::Recorder,
        }
    }

    /// A video selected from the library
    pub fn picked(uri: impl Into<String>, width: u32, height: u32, rotation_degrees: Option<i32>) -> Self {
        Self {
            uri: uri.into(),
            width,
            height,
            rotation_degrees,
            origin: VideoOrigin::Picker,
        }
    }
}

/// Window size reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowDimensions {
    pub width: f64,
    pub height: f64,
}

impl WindowDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Device-wide orientation lock modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrientationLock {
    PortraitUp,
    LandscapeLeft,
    LandscapeRight,
}

/// Permissions the camera screen needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    Camera,
    Microphone,
    MediaLibrary,
}

/// Camera surface and recorder
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Whether the capture surface is mounted and can record
    fn surface_available(&self) -> bool;

    /// Ratios the camera supports, as `"w:h"` strings in device order
    async fn supported_ratios(&self) -> CaptureResult<Vec<String>>;

    /// Record a video.
    ///
    /// Settles once recording ends, either after `stop_recording` or when the
    /// surface is torn down.
    async fn record(&self, config: &RecordingConfig) -> CaptureResult<CapturedVideo>;

    /// Ask the recorder to finish the current recording
    async fn stop_recording(&self) -> CaptureResult<()>;
}

/// Device media library
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    async fn save_to_library(&self, uri: &str) -> CaptureResult<()>;
}

/// Library picker for existing videos
#[async_trait]
pub trait MediaPicker: Send + Sync {
    /// Returns `None` when the user cancels
    async fn pick_video(&self) -> CaptureResult<Option<CapturedVideo>>;
}

/// Permission prompts
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Request a permission if not yet granted, returning whether it is granted
    async fn ensure(&self, permission: Permission) -> CaptureResult<bool>;
}

/// Process-wide device orientation setting.
///
/// Synchronous so a lock can be released from `Drop`.
pub trait OrientationControl: Send + Sync {
    fn lock(&self, mode: OrientationLock) -> CaptureResult<()>;
}
