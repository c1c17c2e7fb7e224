//! Recording system module
//!
//! This module implements the camera recording lifecycle:
//! - RecordingStateMachine driving start/stop of the platform recorder
//! - ToggleGate debouncing the record button
//! - DurationTimer counting elapsed recording time

pub mod debounce;
pub mod machine;
pub mod state;
pub mod timer;

pub use machine::{RecordingStateMachine, Transition};
pub use state::{RecordingConfig, RecordingEvent, RecordingSession, RecordingState, VideoQuality};
