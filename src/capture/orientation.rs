//! Orientation lock and preview geometry
//!
//! The capture screen holds the device in landscape while focused. The lock
//! is process-wide, so it is handed out by an [`OrientationArbiter`] as a
//! guard that restores portrait when dropped.

use super::platform::RatioSource;
use super::ratio::{resolve, DesiredOrientation, SupportedRatio};
use super::traits::{OrientationControl, OrientationLock, WindowDimensions};
use crate::utils::error::{CaptureError, CaptureResult};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Hands out the device orientation lock to one owner at a time
#[derive(Clone)]
pub struct OrientationArbiter {
    control: Arc<dyn OrientationControl>,
    holder: Arc<Mutex<Option<String>>>,
}

impl OrientationArbiter {
    pub fn new(control: Arc<dyn OrientationControl>) -> Self {
        Self {
            control,
            holder: Arc::new(Mutex::new(None)),
        }
    }

    /// Current owner of the lock, if any
    pub fn holder(&self) -> Option<String> {
        self.holder.lock().clone()
    }

    /// Lock the device to `mode` on behalf of `owner`.
    ///
    /// The device returns to portrait when the guard is dropped.
    pub fn acquire(&self, owner: &str, mode: OrientationLock) -> CaptureResult<OrientationGuard> {
        let mut holder = self.holder.lock();
        if let Some(current) = holder.as_ref() {
            return Err(CaptureError::OrientationLockHeld(current.clone()));
        }

        self.control.lock(mode)?;
        *holder = Some(owner.to_string());
        tracing::debug!("{} locked orientation to {:?}", owner, mode);

        Ok(OrientationGuard {
            control: self.control.clone(),
            holder: self.holder.clone(),
            owner: owner.to_string(),
        })
    }
}

/// Scoped hold on the orientation lock
pub struct OrientationGuard {
    control: Arc<dyn OrientationControl>,
    holder: Arc<Mutex<Option<String>>>,
    owner: String,
}

impl OrientationGuard {
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl Drop for OrientationGuard {
    fn drop(&mut self) {
        if let Err(e) = self.control.lock(OrientationLock::PortraitUp) {
            tracing::warn!("Failed to restore portrait orientation: {}", e);
        }
        *self.holder.lock() = None;
        tracing::debug!("{} released orientation lock", self.owner);
    }
}

/// Preview size derived from the window and the resolved ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGeometry {
    pub ratio: SupportedRatio,
    pub preview_width: f64,
    pub preview_height: f64,
    pub is_vertical: bool,
}

impl ResolvedGeometry {
    /// Ratio string for the camera surface
    pub fn ratio_label(&self) -> String {
        self.ratio.to_string()
    }
}

/// Fit the largest preview with the resolved ratio inside the window.
pub fn compute_geometry(
    supported: &[SupportedRatio],
    window: WindowDimensions,
) -> CaptureResult<ResolvedGeometry> {
    let orientation = DesiredOrientation::from_dimensions(window.width, window.height);
    let ratio = resolve(supported, orientation)?;
    let (rw, rh) = (ratio.width as f64, ratio.height as f64);

    let width_constrained_height = window.width * rh / rw;
    let (preview_width, preview_height) = if width_constrained_height <= window.height {
        (window.width, width_constrained_height)
    } else {
        (window.height * rw / rh, window.height)
    };

    Ok(ResolvedGeometry {
        ratio,
        preview_width,
        preview_height,
        is_vertical: orientation == DesiredOrientation::Vertical,
    })
}

/// What the capture preview can show
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    /// Surface not ready yet
    Pending,
    Ready(ResolvedGeometry),
    /// The device cannot capture in this orientation
    Unsupported(String),
}

/// Tracks orientation lock and preview geometry for one capture screen
pub struct OrientationTracker {
    arbiter: OrientationArbiter,
    landscape: OrientationLock,
    ratio_source: Arc<dyn RatioSource>,
    owner: String,
    guard: Option<OrientationGuard>,
    supported: Option<Vec<SupportedRatio>>,
    preview: PreviewState,
}

impl OrientationTracker {
    pub fn new(
        owner: impl Into<String>,
        arbiter: OrientationArbiter,
        landscape: OrientationLock,
        ratio_source: Arc<dyn RatioSource>,
    ) -> Self {
        Self {
            arbiter,
            landscape,
            ratio_source,
            owner: owner.into(),
            guard: None,
            supported: None,
            preview: PreviewState::Pending,
        }
    }

    /// Take the landscape lock for this screen
    pub fn focus(&mut self) -> CaptureResult<()> {
        if self.guard.is_none() {
            self.guard = Some(self.arbiter.acquire(&self.owner, self.landscape)?);
        }
        Ok(())
    }

    /// Give the lock back and drop the cached surface state
    pub fn blur(&mut self) {
        self.guard = None;
        self.supported = None;
        self.preview = PreviewState::Pending;
    }

    pub fn is_locked(&self) -> bool {
        self.guard.is_some()
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Load the supported ratios and lay out the preview
    pub async fn on_surface_ready(&mut self, window: WindowDimensions) -> CaptureResult<ResolvedGeometry> {
        let supported = match self.ratio_source.supported_ratios().await {
            Ok(supported) => supported,
            Err(e) => {
                self.preview = PreviewState::Unsupported(e.to_string());
                return Err(e);
            }
        };
        self.supported = Some(supported);
        self.recompute(window)
    }

    /// Re-layout after the window changed size.
    ///
    /// Returns `None` until the surface has reported ready.
    pub fn on_dimension_change(&mut self, window: WindowDimensions) -> CaptureResult<Option<ResolvedGeometry>> {
        if self.supported.is_none() {
            return Ok(None);
        }
        self.recompute(window).map(Some)
    }

    fn recompute(&mut self, window: WindowDimensions) -> CaptureResult<ResolvedGeometry> {
        let supported = self.supported.as_deref().unwrap_or(&[]);
        match compute_geometry(supported, window) {
            Ok(geometry) => {
                tracing::debug!(
                    "Preview {}x{} at {}",
                    geometry.preview_width,
                    geometry.preview_height,
                    geometry.ratio
                );
                self.preview = PreviewState::Ready(geometry);
                Ok(geometry)
            }
            Err(e) => {
                tracing::warn!("Cannot lay out capture preview: {}", e);
                self.preview = PreviewState::Unsupported(e.to_string());
                Err(e)
            }
        }
    }
}
