//! Error types and handling
//!
//! Common error types used across the capture and ingest pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::DesiredOrientation;
use crate::ingest::validator::Rejection;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Device reports no {0:?} capture ratio")]
    NoSupportedRatio(DesiredOrientation),

    #[error("Recorder failed to start: {0}")]
    RecorderStartFailed(String),

    #[error("Recorder failed to stop: {0}")]
    RecorderStopFailed(String),

    #[error("Video is portrait ({width}x{height})")]
    PortraitDimensions { width: u32, height: u32 },

    #[error("Video rotation of {0} degrees is not landscape")]
    NonLandscapeRotation(i32),

    #[error("Saving to media library failed: {0}")]
    MediaLibrarySaveFailed(String),

    #[error("Orientation lock is held by {0}")]
    OrientationLockHeld(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("No signed-in account")]
    NoAccount,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

impl From<Rejection> for CaptureError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::NonLandscapeRotation { degrees } => CaptureError::NonLandscapeRotation(degrees),
            Rejection::PortraitDimensions { width, height } => {
                CaptureError::PortraitDimensions { width, height }
            }
        }
    }
}

/// Error response for the UI layer
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<CaptureError> for ErrorResponse {
    fn from(error: CaptureError) -> Self {
        let code = match &error {
            CaptureError::Io(_) => "IO_ERROR",
            CaptureError::Serialization(_) => "SERIALIZATION_ERROR",
            CaptureError::NoSupportedRatio(_) => "NO_SUPPORTED_RATIO",
            CaptureError::RecorderStartFailed(_) => "RECORDER_START_FAILED",
            CaptureError::RecorderStopFailed(_) => "RECORDER_STOP_FAILED",
            CaptureError::PortraitDimensions { .. } => "PORTRAIT_DIMENSIONS",
            CaptureError::NonLandscapeRotation(_) => "NON_LANDSCAPE_ROTATION",
            CaptureError::MediaLibrarySaveFailed(_) => "MEDIA_LIBRARY_SAVE_FAILED",
            CaptureError::OrientationLockHeld(_) => "ORIENTATION_LOCK_HELD",
            CaptureError::PermissionDenied(_) => "PERMISSION_DENIED",
            CaptureError::NoAccount => "NO_ACCOUNT",
            CaptureError::InvalidConfig(_) => "INVALID_CONFIG",
            CaptureError::Platform(_) => "PLATFORM_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type alias using CaptureError
pub type CaptureResult<T> = Result<T, CaptureError>;
