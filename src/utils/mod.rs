//! Shared utilities

pub mod error;
pub mod format;

pub use error::{CaptureError, CaptureResult, ErrorResponse};
pub use format::format_duration;
