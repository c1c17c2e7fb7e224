//! Recording state management
//!
//! Defines the recording state machine states and session tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current state of the recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    /// No recording in progress
    Idle,
    /// Recorder asked to begin
    Starting,
    /// Currently recording
    Recording,
    /// Recorder asked to finish, waiting for the video
    Stopping,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Identity of one recording.
///
/// The id doubles as the token a settling recorder must present before its
/// result is acted on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingSession {
    pub id: Uuid,

    /// When recording started
    pub started_at: DateTime<Utc>,
}

impl RecordingSession {
    /// Create a new session starting now
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Recording quality presets understood by the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoQuality {
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "2160p")]
    P2160,
}

/// Configuration passed to the recorder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingConfig {
    /// Quality hint, `None` lets the platform decide
    pub quality: Option<VideoQuality>,
}

/// Events emitted by the recorder
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingEvent {
    /// Recording started
    Started { session_id: Uuid },
    /// Stop requested
    Stopped { session_id: Uuid },
    /// Recorder produced a video for the current session
    Completed { session_id: Uuid, uri: String },
    /// Recorder failed for the current session
    Failed { session_id: Uuid, message: String },
    /// Recorder settled after its session was abandoned
    Discarded { session_id: Uuid },
}
