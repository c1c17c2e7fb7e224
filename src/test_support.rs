//! Fake collaborators for unit tests.
//!
//! These stand in for the camera, media library, navigation and the other
//! device services so the pipeline can be driven without a phone.

use crate::capture::traits::{
    CaptureDevice, CapturedVideo, MediaLibrary, MediaPicker, OrientationControl, OrientationLock,
    Permission, PermissionGate,
};
use crate::ingest::handoff::UploadQueue;
use crate::ingest::routing::{Account, AccountProvider};
use crate::recorder::state::RecordingConfig;
use crate::screens::navigation::{Navigator, RouteParams, Screen};
use crate::screens::notice::{Notice, Notifier};
use crate::utils::error::{CaptureError, CaptureResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Camera whose recording settles when `stop_recording` is called
pub struct FakeCaptureDevice {
    ratios: Vec<String>,
    surface: AtomicBool,
    record_error: Mutex<Option<String>>,
    finish_error: Mutex<Option<String>>,
    stop_error: Mutex<Option<String>>,
    stop_hangs: AtomicBool,
    stopped: Notify,
    record_calls: AtomicUsize,
    stop_calls: AtomicUsize,
}

impl FakeCaptureDevice {
    pub fn new() -> Self {
        Self::with_ratios(&["4:3", "16:9"])
    }

    pub fn with_ratios(ratios: &[&str]) -> Self {
        Self {
            ratios: ratios.iter().map(|r| r.to_string()).collect(),
            surface: AtomicBool::new(true),
            record_error: Mutex::new(None),
            finish_error: Mutex::new(None),
            stop_error: Mutex::new(None),
            stop_hangs: AtomicBool::new(false),
            stopped: Notify::new(),
            record_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_surface_available(&self, available: bool) {
        self.surface.store(available, Ordering::SeqCst);
    }

    /// Make `record` reject straight away
    pub fn fail_record(&self, message: &str) {
        *self.record_error.lock() = Some(message.to_string());
    }

    /// Make the recording fail once it is stopped
    pub fn fail_after_stop(&self, message: &str) {
        *self.finish_error.lock() = Some(message.to_string());
    }

    /// Make `stop_recording` fail
    pub fn fail_stop(&self, message: &str) {
        *self.stop_error.lock() = Some(message.to_string());
    }

    /// Make `stop_recording` never return
    pub fn hang_stop(&self) {
        self.stop_hangs.store(true, Ordering::SeqCst);
    }

    pub fn video_uri(&self) -> String {
        "file:///cache/Camera/recording.mp4".to_string()
    }

    pub fn record_calls(&self) -> usize {
        self.record_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptureDevice for FakeCaptureDevice {
    fn surface_available(&self) -> bool {
        self.surface.load(Ordering::SeqCst)
    }

    async fn supported_ratios(&self) -> CaptureResult<Vec<String>> {
        Ok(self.ratios.clone())
    }

    async fn record(&self, _config: &RecordingConfig) -> CaptureResult<CapturedVideo> {
        self.record_calls.fetch_add(1, Ordering::SeqCst);
        let failure = self.record_error.lock().clone();
        if let Some(message) = failure {
            return Err(CaptureError::Platform(message));
        }
        self.stopped.notified().await;
        let failure = self.finish_error.lock().clone();
        if let Some(message) = failure {
            return Err(CaptureError::Platform(message));
        }
        Ok(CapturedVideo::recorded(self.video_uri(), 1280, 720))
    }

    async fn stop_recording(&self) -> CaptureResult<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        if self.stop_hangs.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let failure = self.stop_error.lock().clone();
        if let Some(message) = failure {
            return Err(CaptureError::RecorderStopFailed(message));
        }
        self.stopped.notify_one();
        Ok(())
    }
}

/// Orientation control that remembers every lock request
#[derive(Default)]
pub struct RecordingOrientationControl {
    history: Mutex<Vec<OrientationLock>>,
}

impl RecordingOrientationControl {
    pub fn history(&self) -> Vec<OrientationLock> {
        self.history.lock().clone()
    }
}

impl OrientationControl for RecordingOrientationControl {
    fn lock(&self, mode: OrientationLock) -> CaptureResult<()> {
        self.history.lock().push(mode);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeMediaLibrary {
    saved: Mutex<Vec<String>>,
    error: Mutex<Option<String>>,
}

impl FakeMediaLibrary {
    pub fn saved(&self) -> Vec<String> {
        self.saved.lock().clone()
    }

    pub fn fail_with(&self, message: &str) {
        *self.error.lock() = Some(message.to_string());
    }
}

#[async_trait]
impl MediaLibrary for FakeMediaLibrary {
    async fn save_to_library(&self, uri: &str) -> CaptureResult<()> {
        let failure = self.error.lock().clone();
        if let Some(message) = failure {
            return Err(CaptureError::Platform(message));
        }
        self.saved.lock().push(uri.to_string());
        Ok(())
    }
}

pub struct FixedAccount(pub Option<Account>);

impl AccountProvider for FixedAccount {
    fn current_account(&self) -> Option<Account> {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<(Screen, RouteParams)>>,
    backs: AtomicUsize,
}

impl RecordingNavigator {
    pub fn calls(&self) -> Vec<(Screen, RouteParams)> {
        self.calls.lock().clone()
    }

    pub fn screens(&self) -> Vec<Screen> {
        self.calls.lock().iter().map(|(screen, _)| *screen).collect()
    }

    pub fn backs(&self) -> usize {
        self.backs.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, screen: Screen, params: RouteParams) {
        self.calls.lock().push((screen, params));
    }

    fn go_back(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

#[derive(Default)]
pub struct RecordingUploadQueue {
    queued: Mutex<Vec<String>>,
}

impl RecordingUploadQueue {
    pub fn queued(&self) -> Vec<String> {
        self.queued.lock().clone()
    }
}

impl UploadQueue for RecordingUploadQueue {
    fn enqueue(&self, video_uri: &str) {
        self.queued.lock().push(video_uri.to_string());
    }
}

/// Grants every permission except an optional denied one
pub struct FakePermissions {
    denied: Option<Permission>,
}

impl FakePermissions {
    pub fn granting() -> Self {
        Self { denied: None }
    }

    pub fn denying(permission: Permission) -> Self {
        Self {
            denied: Some(permission),
        }
    }
}

#[async_trait]
impl PermissionGate for FakePermissions {
    async fn ensure(&self, permission: Permission) -> CaptureResult<bool> {
        Ok(self.denied != Some(permission))
    }
}

/// Picker returning a fixed choice
pub struct FakePicker(pub Option<CapturedVideo>);

#[async_trait]
impl MediaPicker for FakePicker {
    async fn pick_video(&self) -> CaptureResult<Option<CapturedVideo>> {
        Ok(self.0.clone())
    }
}
