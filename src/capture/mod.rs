//! Camera capture
//!
//! Device contracts, platform strategies, ratio resolution and the
//! orientation tracker for the capture screen.

pub mod orientation;
pub mod platform;
pub mod ratio;
pub mod traits;

pub use orientation::{OrientationArbiter, OrientationGuard, OrientationTracker, PreviewState, ResolvedGeometry};
pub use platform::{Platform, PlatformProfile, RatioSource, RotationPolicy};
pub use ratio::{resolve, DesiredOrientation, SupportedRatio};
pub use traits::{
    CaptureDevice, CapturedVideo, MediaLibrary, MediaPicker, OrientationControl, OrientationLock,
    Permission, PermissionGate, VideoOrigin, WindowDimensions,
};
