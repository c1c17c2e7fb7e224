//! Landscape validation for picked videos

use crate::capture::platform::RotationPolicy;
use crate::capture::traits::CapturedVideo;
use std::sync::Arc;
use thiserror::Error;

/// Why a video may not be uploaded
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("rotation of {degrees} degrees is not landscape")]
    NonLandscapeRotation { degrees: i32 },

    #[error("portrait dimensions {width}x{height}")]
    PortraitDimensions { width: u32, height: u32 },
}

/// A video that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedVideo(CapturedVideo);

impl AcceptedVideo {
    pub fn video(&self) -> &CapturedVideo {
        &self.0
    }

    pub fn into_inner(self) -> CapturedVideo {
        self.0
    }
}

/// Checks that media is landscape before it is routed
#[derive(Clone)]
pub struct CaptureValidator {
    rotation: Arc<dyn RotationPolicy>,
}

impl CaptureValidator {
    pub fn new(rotation: Arc<dyn RotationPolicy>) -> Self {
        Self { rotation }
    }

    /// Validate a video: rotation first, then dimensions
    pub fn validate(&self, video: CapturedVideo) -> Result<AcceptedVideo, Rejection> {
        if let Some(degrees) = self.rotation.non_landscape(video.rotation_degrees) {
            tracing::info!("Rejecting {}: rotation {}", video.uri, degrees);
            return Err(Rejection::NonLandscapeRotation { degrees });
        }

        if video.height > video.width {
            tracing::info!("Rejecting {}: {}x{}", video.uri, video.width, video.height);
            return Err(Rejection::PortraitDimensions {
                width: video.width,
                height: video.height,
            });
        }

        Ok(AcceptedVideo(video))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::platform::{RotationChecked, RotationIgnored};

    fn android() -> CaptureValidator {
        CaptureValidator::new(Arc::new(RotationChecked { modulus: 180 }))
    }

    fn ios() -> CaptureValidator {
        CaptureValidator::new(Arc::new(RotationIgnored))
    }

    #[test]
    fn test_landscape_accepted_on_android() {
        let video = CapturedVideo::picked("file:///a.mp4", 1920, 1080, Some(0));
        let accepted = android().validate(video.clone()).unwrap();
        assert_eq!(accepted.into_inner(), video);
    }

    #[test]
    fn test_portrait_rejected_on_android() {
        let video = CapturedVideo::picked("file:///a.mp4", 1080, 1920, Some(0));
        assert_eq!(
            android().validate(video),
            Err(Rejection::PortraitDimensions {
                width: 1080,
                height: 1920
            })
        );
    }

    #[test]
    fn test_portrait_rejected_on_every_platform() {
        for validator in [android(), ios()] {
            for (w, h) in [(1080, 1920), (720, 1280), (1, 2)] {
                let video = CapturedVideo::picked("file:///p.mp4", w, h, Some(0));
                assert!(matches!(
                    validator.validate(video),
                    Err(Rejection::PortraitDimensions { .. })
                ));
            }
        }
    }

    #[test]
    fn test_rotation_checked_before_dimensions() {
        let video = CapturedVideo::picked("file:///r.mp4", 1080, 1920, Some(90));
        assert_eq!(
            android().validate(video),
            Err(Rejection::NonLandscapeRotation { degrees: 90 })
        );
    }

    #[test]
    fn test_rotation_ignored_on_ios() {
        let video = CapturedVideo::picked("file:///r.mp4", 1920, 1080, Some(90));
        assert!(ios().validate(video).is_ok());
    }

    #[test]
    fn test_portrait_rejected_whatever_the_origin() {
        let video = CapturedVideo::recorded("file:///rec.mp4", 1080, 1920);
        assert_eq!(
            android().validate(video),
            Err(Rejection::PortraitDimensions {
                width: 1080,
                height: 1920
            })
        );
    }
}
