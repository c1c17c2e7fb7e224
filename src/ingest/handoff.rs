//! Hand-off from capture to the upload pipeline
//!
//! Serves the CachingVideo route: recorded videos are saved to the media
//! library first, picked videos are validated instead. Either way the video
//! is then routed and queued for upload.

use super::routing::{decide, AccountProvider, RoutingTarget, SessionFlags};
use super::validator::{CaptureValidator, Rejection};
use crate::capture::traits::{CapturedVideo, MediaLibrary};
use crate::screens::navigation::{CachingParams, Navigator, RouteParams, Screen};
use crate::screens::notice::{Notice, Notifier};
use crate::utils::error::{CaptureError, CaptureResult};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Upload queue that takes over once routing is done
pub trait UploadQueue: Send + Sync {
    fn enqueue(&self, video_uri: &str);
}

/// Outcome of handling one CachingVideo route
#[derive(Debug, Clone, PartialEq)]
pub enum HandoffOutcome {
    Routed(RoutingTarget),
    /// Validation failed; the user was alerted and sent home
    Rejected(Rejection),
    /// This route key was already handled
    AlreadyHandled,
}

/// External services the hand-off talks to
pub struct HandoffDeps {
    pub media_library: Arc<dyn MediaLibrary>,
    pub accounts: Arc<dyn AccountProvider>,
    pub navigator: Arc<dyn Navigator>,
    pub upload_queue: Arc<dyn UploadQueue>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct IngestHandoff {
    deps: HandoffDeps,
    validator: CaptureValidator,
    flags: Arc<SessionFlags>,
    handled: Mutex<HashSet<String>>,
}

impl IngestHandoff {
    pub fn new(deps: HandoffDeps, validator: CaptureValidator, flags: Arc<SessionFlags>) -> Self {
        Self {
            deps,
            validator,
            flags,
            handled: Mutex::new(HashSet::new()),
        }
    }

    /// Process the params of a CachingVideo route.
    ///
    /// Each `route_key` is processed at most once; repeats return
    /// [`HandoffOutcome::AlreadyHandled`].
    pub async fn handle(&self, route_key: &str, params: &CachingParams) -> CaptureResult<HandoffOutcome> {
        if !self.handled.lock().insert(route_key.to_string()) {
            tracing::debug!("Route {} already handled", route_key);
            return Ok(HandoffOutcome::AlreadyHandled);
        }

        match params {
            CachingParams::Recorded { video_for_save_uri } => self.ingest_recorded(video_for_save_uri).await,
            CachingParams::Picked { video_info } => self.ingest_picked(video_info.clone()),
        }
    }

    async fn ingest_recorded(&self, uri: &str) -> CaptureResult<HandoffOutcome> {
        if let Err(e) = self.deps.media_library.save_to_library(uri).await {
            let error = match e {
                CaptureError::MediaLibrarySaveFailed(_) => e,
                other => CaptureError::MediaLibrarySaveFailed(other.to_string()),
            };
            tracing::error!("Failed to save {}: {}", uri, error);
            self.deps.notifier.alert(Notice::from_error(&error));
            return Err(error);
        }

        tracing::info!("Saved {} to media library", uri);
        self.route(uri).map(HandoffOutcome::Routed)
    }

    fn ingest_picked(&self, video: CapturedVideo) -> CaptureResult<HandoffOutcome> {
        match self.validator.validate(video) {
            Ok(accepted) => {
                let video = accepted.into_inner();
                self.route(&video.uri).map(HandoffOutcome::Routed)
            }
            Err(rejection) => {
                let error = CaptureError::from(rejection);
                tracing::warn!("Picked video rejected: {}", error);
                self.deps.notifier.alert(Notice::from_error(&error));
                self.deps.navigator.navigate(Screen::Home, RouteParams::None);
                Ok(HandoffOutcome::Rejected(rejection))
            }
        }
    }

    fn route(&self, uri: &str) -> CaptureResult<RoutingTarget> {
        let account = self.deps.accounts.current_account().ok_or(CaptureError::NoAccount)?;
        let target = decide(&account, uri);
        self.flags.publish_single_recipient(target.single_recipient);

        tracing::info!("Routing {} to {:?}", uri, target.destination);
        self.deps
            .navigator
            .navigate(target.destination.screen(), RouteParams::Routing(target.clone()));
        self.deps.upload_queue.enqueue(uri);
        Ok(target)
    }
}
