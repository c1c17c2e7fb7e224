//! Camera screen controller
//!
//! Owns the orientation tracker and recording state machine for the
//! CameraMode screen and turns their results into navigation and notices.

use super::navigation::{CachingParams, Navigator, RouteParams, Screen};
use super::notice::{Notice, Notifier};
use crate::capture::orientation::{OrientationArbiter, OrientationTracker, PreviewState, ResolvedGeometry};
use crate::capture::platform::{Platform, PlatformProfile};
use crate::capture::traits::{CaptureDevice, CapturedVideo, Permission, PermissionGate, WindowDimensions};
use crate::config::CaptureConfig;
use crate::recorder::{RecordingStateMachine, Transition};
use crate::utils::error::{CaptureError, CaptureResult};
use crate::utils::format::format_duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Route name used as the orientation lock owner
const SCREEN_NAME: &str = "CameraMode";

const REQUIRED_PERMISSIONS: [Permission; 3] = [
    Permission::Camera,
    Permission::Microphone,
    Permission::MediaLibrary,
];

/// Permission state of the camera screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// Waiting for camera
    Waiting,
    Granted,
    /// No access to camera
    Denied,
}

/// Services the camera screen depends on
pub struct CameraDeps {
    pub device: Arc<dyn CaptureDevice>,
    pub orientation: OrientationArbiter,
    pub permissions: Arc<dyn PermissionGate>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct CameraScreen {
    profile: PlatformProfile,
    tracker: OrientationTracker,
    machine: RecordingStateMachine,
    permissions: Arc<dyn PermissionGate>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    permission: PermissionStatus,
    denied: Vec<Permission>,
}

impl CameraScreen {
    pub fn new(profile: PlatformProfile, config: &CaptureConfig, deps: CameraDeps) -> Self {
        let tracker = OrientationTracker::new(
            SCREEN_NAME,
            deps.orientation,
            profile.landscape_lock(),
            profile.ratio_source(deps.device.clone()),
        );
        let machine = RecordingStateMachine::new(deps.device, profile.recording_config(config), config);

        Self {
            profile,
            tracker,
            machine,
            permissions: deps.permissions,
            navigator: deps.navigator,
            notifier: deps.notifier,
            permission: PermissionStatus::Waiting,
            denied: Vec::new(),
        }
    }

    pub fn permission(&self) -> PermissionStatus {
        self.permission
    }

    pub fn preview(&self) -> &PreviewState {
        self.tracker.preview()
    }

    pub fn machine(&self) -> &RecordingStateMachine {
        &self.machine
    }

    /// Elapsed recording time for the on-screen timer
    pub fn timer_label(&self) -> String {
        format_duration(self.machine.elapsed_ms())
    }

    /// Screen gained focus: lock landscape and make sure permissions are granted
    pub async fn focus(&mut self) -> CaptureResult<PermissionStatus> {
        self.tracker.focus()?;
        self.machine.focus();

        self.denied.clear();
        for permission in REQUIRED_PERMISSIONS {
            if !self.permissions.ensure(permission).await? {
                tracing::warn!("{:?} permission not granted", permission);
                self.denied.push(permission);
            }
        }

        self.permission = match self.permission_error() {
            None => PermissionStatus::Granted,
            Some(error) => {
                // Android shows its own rationale dialog
                if self.profile.platform == Platform::Ios {
                    self.notifier.alert(Notice::from_error(&error));
                }
                PermissionStatus::Denied
            }
        };
        Ok(self.permission)
    }

    fn permission_error(&self) -> Option<CaptureError> {
        if self.denied.is_empty() {
            return None;
        }
        let names: Vec<String> = self.denied.iter().map(|p| format!("{:?}", p)).collect();
        Some(CaptureError::PermissionDenied(names.join(", ")))
    }

    /// Screen lost focus: release the orientation lock and abandon any recording
    pub async fn blur(&mut self) {
        self.tracker.blur();
        self.machine.blur().await;
    }

    /// Capture surface mounted
    pub async fn on_surface_ready(&mut self, window: WindowDimensions) -> CaptureResult<ResolvedGeometry> {
        let result = self.tracker.on_surface_ready(window).await;
        self.alert_unsupported(result)
    }

    /// Window resized or rotated
    pub fn on_dimension_change(&mut self, window: WindowDimensions) -> CaptureResult<Option<ResolvedGeometry>> {
        let result = self.tracker.on_dimension_change(window);
        self.alert_unsupported(result)
    }

    fn alert_unsupported<T>(&self, result: CaptureResult<T>) -> CaptureResult<T> {
        if let Err(e) = &result {
            let notice = if is_capability_error(e) {
                Notice::capture_unsupported(&e.to_string())
            } else {
                Notice::from_error(e)
            };
            self.notifier.alert(notice);
        }
        result
    }

    /// Record button pressed.
    ///
    /// Fails with `PermissionDenied` when access was refused on focus.
    pub async fn press_record(&self) -> CaptureResult<Transition> {
        match self.permission {
            PermissionStatus::Granted => {}
            PermissionStatus::Waiting => return Ok(Transition::Unavailable),
            PermissionStatus::Denied => {
                return Err(self
                    .permission_error()
                    .unwrap_or_else(|| CaptureError::PermissionDenied("camera".to_string())));
            }
        }

        match self.machine.toggle().await {
            Ok(Transition::Stopped(Some(video))) => {
                self.open_caching(&video);
                Ok(Transition::Stopped(Some(video)))
            }
            Ok(transition) => Ok(transition),
            Err(e) => {
                self.notifier.alert(Notice::from_error(&e));
                Err(e)
            }
        }
    }

    /// Act on a recording that settled without a stop press
    pub fn collect_settled(&self) -> CaptureResult<Option<CapturedVideo>> {
        match self.machine.take_settled() {
            Some(Ok(video)) => {
                self.open_caching(&video);
                Ok(Some(video))
            }
            Some(Err(e)) => {
                self.notifier.alert(Notice::from_error(&e));
                Err(e)
            }
            None => Ok(None),
        }
    }

    /// Cancel pressed
    pub async fn back(&self) {
        if self.machine.is_shooting() {
            self.machine.abandon().await;
        }
        self.navigator.go_back();
    }

    fn open_caching(&self, video: &CapturedVideo) {
        tracing::info!("Handing {} to caching", video.uri);
        self.navigator.navigate(
            Screen::CachingVideo,
            RouteParams::CachingVideo(CachingParams::Recorded {
                video_for_save_uri: video.uri.clone(),
            }),
        );
    }
}

impl std::fmt::Debug for CameraScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraScreen")
            .field("profile", &self.profile)
            .field("permission", &self.permission)
            .field("state", &self.machine.state())
            .field("session", &self.machine.current_session().map(|s| s.id))
            .finish()
    }
}

/// Whether an error leaves the camera unusable
fn is_capability_error(error: &CaptureError) -> bool {
    matches!(error, CaptureError::NoSupportedRatio(_))
}
