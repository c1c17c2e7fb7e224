//! Home screen actions: pick an existing video or shoot a new one

use super::navigation::{CachingParams, Navigator, RouteParams, Screen};
use crate::capture::traits::MediaPicker;
use crate::utils::error::CaptureResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct HomeScreen {
    picker: Arc<dyn MediaPicker>,
    navigator: Arc<dyn Navigator>,
    loading: AtomicBool,
}

impl HomeScreen {
    pub fn new(picker: Arc<dyn MediaPicker>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            picker,
            navigator,
            loading: AtomicBool::new(false),
        }
    }

    /// Whether the picker is open
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    /// Open the library picker and hand a chosen video to caching.
    ///
    /// Returns `false` if the user cancelled.
    pub async fn pick_video(&self) -> CaptureResult<bool> {
        self.loading.store(true, Ordering::Relaxed);
        let picked = self.picker.pick_video().await;
        self.loading.store(false, Ordering::Relaxed);

        let Some(video) = picked? else {
            tracing::debug!("Picker cancelled");
            return Ok(false);
        };

        tracing::info!("Picked {} ({}x{})", video.uri, video.width, video.height);
        self.navigator.navigate(
            Screen::CachingVideo,
            RouteParams::CachingVideo(CachingParams::Picked { video_info: video }),
        );
        Ok(true)
    }

    /// Go to the camera
    pub fn shoot_new(&self) {
        self.navigator.navigate(Screen::CameraMode, RouteParams::None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::traits::CapturedVideo;
    use crate::test_support::{FakePicker, RecordingNavigator};

    #[tokio::test]
    async fn test_pick_navigates_to_caching() {
        let video = CapturedVideo::picked("file:///pick.mp4", 1920, 1080, Some(0));
        let navigator = Arc::new(RecordingNavigator::default());
        let home = HomeScreen::new(Arc::new(FakePicker(Some(video.clone()))), navigator.clone());

        assert!(home.pick_video().await.unwrap());
        assert!(!home.is_loading());
        assert_eq!(
            navigator.calls(),
            vec![(
                Screen::CachingVideo,
                RouteParams::CachingVideo(CachingParams::Picked { video_info: video })
            )]
        );
    }

    #[tokio::test]
    async fn test_cancelled_pick_stays_home() {
        let navigator = Arc::new(RecordingNavigator::default());
        let home = HomeScreen::new(Arc::new(FakePicker(None)), navigator.clone());

        assert!(!home.pick_video().await.unwrap());
        assert!(navigator.calls().is_empty());
    }

    #[test]
    fn test_shoot_new_opens_camera() {
        let navigator = Arc::new(RecordingNavigator::default());
        let home = HomeScreen::new(Arc::new(FakePicker(None)), navigator.clone());

        home.shoot_new();
        assert_eq!(navigator.screens(), vec![Screen::CameraMode]);
    }
}
