//! Pre-upload validation and routing
//!
//! - CaptureValidator rejects non-landscape picked media
//! - RoutingDecision picks the recipient selection screen
//! - IngestHandoff ties both to the media library and upload queue

pub mod handoff;
pub mod routing;
pub mod validator;

pub use handoff::{HandoffDeps, HandoffOutcome, IngestHandoff, UploadQueue};
pub use routing::{decide, Account, AccountProvider, Destination, Role, RoutingTarget, SessionFlags};
pub use validator::{AcceptedVideo, CaptureValidator, Rejection};
