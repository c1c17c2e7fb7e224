//! Recording state machine
//!
//! Drives the camera recorder through Idle → Starting → Recording →
//! Stopping → Idle. The platform recording runs as a spawned task that
//! settles once the recorder finishes; its result is only acted on if the
//! session that started it is still current.

use super::debounce::{GatePermit, ToggleGate};
use super::state::{RecordingConfig, RecordingEvent, RecordingSession, RecordingState};
use super::timer::DurationTimer;
use crate::capture::traits::{CaptureDevice, CapturedVideo};
use crate::config::CaptureConfig;
use crate::utils::error::{CaptureError, CaptureResult};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

/// Result of one record button press
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Swallowed by the debounce gate or a transition already running
    Ignored,
    /// No capture surface, not focused, or not idle
    Unavailable,
    Started,
    /// Recording stopped; `None` when the result was discarded
    Stopped(Option<CapturedVideo>),
}

/// What the spawned recording task hands back
type Settlement = Option<CaptureResult<CapturedVideo>>;

struct ActiveSession {
    session: RecordingSession,
    timer: Option<DurationTimer>,
    pending: Option<JoinHandle<Settlement>>,
}

struct Inner {
    state: RecordingState,
    focused: bool,
    active: Option<ActiveSession>,
    /// Recorder result that settled while nobody was waiting on it
    settled: Option<CaptureResult<CapturedVideo>>,
}

impl Inner {
    fn is_current(&self, session_id: Uuid) -> bool {
        self.active.as_ref().map(|a| a.session.id) == Some(session_id)
    }

    /// Drop the active session, cancelling its timer
    fn clear(&mut self) -> Option<ActiveSession> {
        self.state = RecordingState::Idle;
        let mut active = self.active.take()?;
        if let Some(timer) = active.timer.take() {
            timer.cancel();
        }
        Some(active)
    }
}

/// Recording state machine for one capture screen
pub struct RecordingStateMachine {
    device: Arc<dyn CaptureDevice>,
    config: RecordingConfig,
    tick: Duration,
    inner: Arc<Mutex<Inner>>,
    gate: Mutex<ToggleGate>,
    event_tx: broadcast::Sender<RecordingEvent>,
}

impl RecordingStateMachine {
    pub fn new(device: Arc<dyn CaptureDevice>, config: RecordingConfig, settings: &CaptureConfig) -> Self {
        let (event_tx, _) = broadcast::channel(32);
        Self {
            device,
            config,
            tick: settings.timer_tick(),
            inner: Arc::new(Mutex::new(Inner {
                state: RecordingState::Idle,
                focused: false,
                active: None,
                settled: None,
            })),
            gate: Mutex::new(ToggleGate::new(settings.debounce_window())),
            event_tx,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.inner.lock().state
    }

    pub fn is_shooting(&self) -> bool {
        matches!(
            self.state(),
            RecordingState::Starting | RecordingState::Recording
        )
    }

    /// Elapsed time of the running recording, zero when not recording
    pub fn elapsed_ms(&self) -> u64 {
        self.inner
            .lock()
            .active
            .as_ref()
            .and_then(|a| a.timer.as_ref())
            .map_or(0, |t| t.elapsed_ms())
    }

    pub fn current_session(&self) -> Option<RecordingSession> {
        self.inner.lock().active.as_ref().map(|a| a.session.clone())
    }

    /// Subscribe to recorder events
    pub fn subscribe(&self) -> broadcast::Receiver<RecordingEvent> {
        self.event_tx.subscribe()
    }

    /// Recorder outcome that settled without a pending stop
    pub fn take_settled(&self) -> Option<CaptureResult<CapturedVideo>> {
        self.inner.lock().settled.take()
    }

    /// The owning screen gained focus
    pub fn focus(&self) {
        self.inner.lock().focused = true;
    }

    /// The owning screen lost focus.
    ///
    /// Abandons any recording: the session token is invalidated so the
    /// recorder's eventual result is discarded, and the recorder is asked to
    /// stop. The in-flight platform call itself is not cancelled.
    pub async fn blur(&self) {
        let abandoned = {
            let mut inner = self.inner.lock();
            inner.focused = false;
            inner.clear()
        };
        self.release(abandoned).await;
    }

    /// Abandon the current recording without losing focus
    pub async fn abandon(&self) {
        let abandoned = self.inner.lock().clear();
        self.release(abandoned).await;
    }

    async fn release(&self, abandoned: Option<ActiveSession>) {
        let Some(active) = abandoned else {
            return;
        };
        tracing::info!("Abandoning recording {}", active.session.id);
        // Detach the pending task; it settles on its own and is discarded
        drop(active.pending);
        if let Err(e) = self.device.stop_recording().await {
            tracing::warn!("Recorder did not stop cleanly: {}", e);
        }
    }

    /// Handle a record button press
    pub async fn toggle(&self) -> CaptureResult<Transition> {
        let Some(_permit) = GatePermit::acquire(&self.gate, Instant::now()) else {
            tracing::debug!("Record press debounced");
            return Ok(Transition::Ignored);
        };

        match self.state() {
            RecordingState::Idle => Ok(if self.start()? {
                Transition::Started
            } else {
                Transition::Unavailable
            }),
            RecordingState::Recording => Ok(Transition::Stopped(self.stop().await?)),
            RecordingState::Starting | RecordingState::Stopping => Ok(Transition::Ignored),
        }
    }

    /// Begin recording.
    ///
    /// Returns `false` without changing state when there is no capture
    /// surface, the screen is not focused, or a recording is already active.
    pub fn start(&self) -> CaptureResult<bool> {
        if !self.device.surface_available() {
            tracing::debug!("No capture surface, ignoring start");
            return Ok(false);
        }

        let session = RecordingSession::new();
        let session_id = session.id;
        {
            let mut inner = self.inner.lock();
            if inner.state != RecordingState::Idle || !inner.focused {
                return Ok(false);
            }
            inner.state = RecordingState::Starting;
            inner.settled = None;
            inner.active = Some(ActiveSession {
                session,
                timer: Some(DurationTimer::start(self.tick)),
                pending: None,
            });
        }

        tracing::info!("Starting recording {}", session_id);

        let device = self.device.clone();
        let config = self.config.clone();
        let inner = self.inner.clone();
        let events = self.event_tx.clone();
        let handle = tokio::spawn(async move {
            let result = device.record(&config).await;
            settle(&inner, &events, session_id, result)
        });

        {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            if let Some(active) = inner.active.as_mut().filter(|a| a.session.id == session_id) {
                active.pending = Some(handle);
                if inner.state == RecordingState::Starting {
                    inner.state = RecordingState::Recording;
                }
            }
        }

        let _ = self.event_tx.send(RecordingEvent::Started { session_id });
        Ok(true)
    }

    /// Stop recording and wait for the produced video.
    ///
    /// Returns `Ok(None)` when nothing was recording or the result was
    /// discarded because the session was abandoned meanwhile.
    pub async fn stop(&self) -> CaptureResult<Option<CapturedVideo>> {
        let (session_id, pending) = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            if inner.state != RecordingState::Recording {
                return Ok(None);
            }
            let Some(active) = inner.active.as_mut() else {
                inner.state = RecordingState::Idle;
                return Ok(None);
            };
            inner.state = RecordingState::Stopping;
            if let Some(timer) = active.timer.take() {
                timer.cancel();
            }
            (active.session.id, active.pending.take())
        };

        tracing::info!("Stopping recording {}", session_id);
        let _ = self.event_tx.send(RecordingEvent::Stopped { session_id });

        if let Err(e) = self.device.stop_recording().await {
            self.reset_if_current(session_id);
            return Err(match e {
                CaptureError::RecorderStopFailed(_) => e,
                other => CaptureError::RecorderStopFailed(other.to_string()),
            });
        }

        let Some(pending) = pending else {
            self.reset_if_current(session_id);
            return Ok(None);
        };

        match pending.await {
            Ok(Some(result)) => result.map(Some),
            Ok(None) => Ok(None),
            Err(e) => {
                self.reset_if_current(session_id);
                Err(CaptureError::RecorderStopFailed(e.to_string()))
            }
        }
    }

    fn reset_if_current(&self, session_id: Uuid) {
        let mut inner = self.inner.lock();
        if inner.is_current(session_id) {
            inner.clear();
        }
    }
}

impl Drop for RecordingStateMachine {
    fn drop(&mut self) {
        // The recording task keeps `inner` alive; make sure the timer stops with us
        let mut inner = self.inner.lock();
        inner.focused = false;
        inner.clear();
    }
}

/// Apply a recorder result if its session is still current.
///
/// The result goes back to a waiting `stop` through the task handle;
/// otherwise it is parked for [`RecordingStateMachine::take_settled`].
fn settle(
    inner: &Mutex<Inner>,
    events: &broadcast::Sender<RecordingEvent>,
    session_id: Uuid,
    result: CaptureResult<CapturedVideo>,
) -> Settlement {
    let mut inner = inner.lock();
    if !inner.is_current(session_id) || !inner.focused {
        tracing::debug!("Discarding stale recorder result for {}", session_id);
        let _ = events.send(RecordingEvent::Discarded { session_id });
        return None;
    }

    let awaited = inner.state == RecordingState::Stopping;
    inner.clear();
    let result = result.map_err(|e| recorder_error(e, awaited));

    match &result {
        Ok(video) => {
            tracing::info!("Recording {} produced {}", session_id, video.uri);
            let _ = events.send(RecordingEvent::Completed {
                session_id,
                uri: video.uri.clone(),
            });
        }
        Err(e) => {
            tracing::error!("Recording {} failed: {}", session_id, e);
            let _ = events.send(RecordingEvent::Failed {
                session_id,
                message: e.to_string(),
            });
        }
    }

    if awaited {
        Some(result)
    } else {
        inner.settled = Some(result);
        None
    }
}

/// Report a recorder failure as a start or stop failure.
///
/// A failure that arrives while a stop is waiting belongs to the stop.
fn recorder_error(error: CaptureError, awaited: bool) -> CaptureError {
    match error {
        CaptureError::RecorderStartFailed(_) | CaptureError::RecorderStopFailed(_) => error,
        other if awaited => CaptureError::RecorderStopFailed(other.to_string()),
        other => CaptureError::RecorderStartFailed(other.to_string()),
    }
}
