//! Blocking user notices

use crate::utils::error::CaptureError;
use serde::{Deserialize, Serialize};

/// A dismissable alert shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub cancelable: bool,
}

impl Notice {
    pub fn non_landscape() -> Self {
        Self {
            title: "Please choose another video.".to_string(),
            message: "Only videos shot in landscape mode can be uploaded.".to_string(),
            cancelable: true,
        }
    }

    pub fn permissions_required() -> Self {
        Self {
            title: "Permissions required".to_string(),
            message: "Allow camera, microphone and photo library access in Settings to record videos."
                .to_string(),
            cancelable: true,
        }
    }

    pub fn capture_unsupported(reason: &str) -> Self {
        Self {
            title: "Camera not supported".to_string(),
            message: reason.to_string(),
            cancelable: true,
        }
    }

    pub fn from_error(error: &CaptureError) -> Self {
        let title = match error {
            CaptureError::PortraitDimensions { .. } | CaptureError::NonLandscapeRotation(_) => {
                return Self::non_landscape();
            }
            CaptureError::PermissionDenied(_) => return Self::permissions_required(),
            CaptureError::RecorderStartFailed(_) | CaptureError::RecorderStopFailed(_) => {
                "Recording failed"
            }
            CaptureError::MediaLibrarySaveFailed(_) => "Could not save video",
            CaptureError::NoSupportedRatio(_) => "Camera not supported",
            _ => "Something went wrong",
        };
        Self {
            title: title.to_string(),
            message: error.to_string(),
            cancelable: true,
        }
    }
}

/// Shows notices to the user
pub trait Notifier: Send + Sync {
    fn alert(&self, notice: Notice);
}
