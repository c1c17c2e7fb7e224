//! Screen controllers for the capture flow
//!
//! The Home and CameraMode screens live here together with the navigation
//! and notice contracts they share. The CachingVideo route is served by
//! [`crate::ingest::IngestHandoff`].

pub mod camera;
pub mod home;
pub mod navigation;
pub mod notice;

pub use camera::{CameraDeps, CameraScreen, PermissionStatus};
pub use home::HomeScreen;
pub use navigation::{CachingParams, Navigator, RouteParams, Screen};
pub use notice::{Notice, Notifier};
