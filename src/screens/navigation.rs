//! Navigation contract

use crate::capture::traits::CapturedVideo;
use crate::ingest::routing::RoutingTarget;
use serde::{Deserialize, Serialize};

/// Screens the capture flow navigates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Home,
    CameraMode,
    CachingVideo,
    CategorySelect,
    StudentSelect,
}

/// Params for the CachingVideo screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CachingParams {
    /// Freshly recorded, still to be saved to the library
    Recorded { video_for_save_uri: String },
    /// Picked from the library
    Picked { video_info: CapturedVideo },
}

/// Payload attached to a navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteParams {
    None,
    CachingVideo(CachingParams),
    Routing(RoutingTarget),
}

/// Navigation container
pub trait Navigator: Send + Sync {
    fn navigate(&self, screen: Screen, params: RouteParams);

    fn go_back(&self);
}
