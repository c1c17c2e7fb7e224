//! Capture aspect ratio resolution
//!
//! Devices report the aspect ratios their camera can capture at as `"w:h"`
//! strings. The resolver narrows that list down to the ones matching the
//! screen orientation and picks the canonical 3:4 / 4:3 ratio when present.

use crate::utils::error::{CaptureError, CaptureResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aspect ratio reported by the capture device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupportedRatio {
    pub width: u32,
    pub height: u32,
}

impl SupportedRatio {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the ratio describes the given orientation.
    ///
    /// Square ratios match neither orientation.
    pub fn matches(&self, orientation: DesiredOrientation) -> bool {
        match orientation {
            DesiredOrientation::Vertical => self.width < self.height,
            DesiredOrientation::Horizontal => self.width > self.height,
        }
    }
}

impl fmt::Display for SupportedRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Failure to parse a `"w:h"` ratio string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ratio '{0}'")]
pub struct ParseRatioError(String);

impl FromStr for SupportedRatio {
    type Err = ParseRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRatioError(s.to_string());
        let (w, h) = s.trim().split_once(':').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

/// Orientation the preview is laid out in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredOrientation {
    Vertical,
    Horizontal,
}

impl DesiredOrientation {
    /// Orientation implied by window dimensions
    pub fn from_dimensions(width: f64, height: f64) -> Self {
        if width < height {
            DesiredOrientation::Vertical
        } else {
            DesiredOrientation::Horizontal
        }
    }

    /// The ratio preferred for this orientation
    pub fn canonical_ratio(&self) -> SupportedRatio {
        match self {
            DesiredOrientation::Vertical => SupportedRatio::new(3, 4),
            DesiredOrientation::Horizontal => SupportedRatio::new(4, 3),
        }
    }
}

/// Parse device ratio strings, keeping device order and skipping malformed entries.
pub fn parse_ratios<S: AsRef<str>>(raw: &[S]) -> Vec<SupportedRatio> {
    raw.iter()
        .filter_map(|s| match s.as_ref().parse::<SupportedRatio>() {
            Ok(ratio) => Some(ratio),
            Err(e) => {
                tracing::warn!("Skipping device ratio: {}", e);
                None
            }
        })
        .collect()
}

/// Pick the capture ratio for an orientation.
///
/// Returns the canonical ratio if the device supports it, otherwise the last
/// orientation-matching ratio in device order.
pub fn resolve(
    supported: &[SupportedRatio],
    orientation: DesiredOrientation,
) -> CaptureResult<SupportedRatio> {
    let desired = orientation.canonical_ratio();
    let mut fallback = None;

    for ratio in supported.iter().filter(|r| r.matches(orientation)) {
        if *ratio == desired {
            return Ok(desired);
        }
        fallback = Some(*ratio);
    }

    fallback.ok_or(CaptureError::NoSupportedRatio(orientation))
}
