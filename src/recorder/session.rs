//! Recording session lifecycle
//!
//! Owns the acquired stream, the bound recorder, and the buffered data
//! segments, and drives the idle, recording, stopped transitions in reaction
//! to user commands and recorder events.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use crate::browser::{self, BrowserIdentity};
use crate::capture::constraints::{constraints_for, CapturePolicy};
use crate::capture::traits::{MediaPlatform, MediaRecorder, MediaStream, RecorderEvent};
use crate::recorder::encoding::{negotiate, Container, EncodingChoice};
use crate::recorder::state::{output_file_name, RecordingArtifact, RecordingState};
use crate::utils::error::RecorderError;

/// Fixed data-delivery interval handed to the recorder, in milliseconds
pub const DATA_INTERVAL_MS: u64 = 1000;

/// Lifecycle events emitted by a session
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Stream acquired and recorder bound
    Initialized,
    /// Recording started
    Started,
    /// Recording stopped; an artifact may have been published
    Stopped,
    /// A non-fatal failure was reported
    Error(String),
}

/// Stateful recording session bound to one acquired stream.
///
/// Invalid transitions (start while recording, stop while idle) are guarded
/// no-ops, never errors; the worst case is an inert control surface. The
/// chunk buffer is append-only while recording and resets only on
/// re-initialization.
pub struct RecordingSession {
    id: Uuid,
    platform: Arc<dyn MediaPlatform>,
    policy: CapturePolicy,
    state: Arc<RwLock<RecordingState>>,
    browser: Option<BrowserIdentity>,
    stream: Option<Arc<dyn MediaStream>>,
    recorder: Option<Box<dyn MediaRecorder>>,
    recorder_events: Option<mpsc::UnboundedReceiver<RecorderEvent>>,
    encoding: Option<EncodingChoice>,
    chunks: Vec<Bytes>,
    artifact: Option<RecordingArtifact>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl RecordingSession {
    /// Create an uninitialized session on top of a platform
    pub fn new(platform: Arc<dyn MediaPlatform>, policy: CapturePolicy) -> Self {
        let (event_tx, _) = broadcast::channel(16);
        Self {
            id: Uuid::new_v4(),
            platform,
            policy,
            state: Arc::new(RwLock::new(RecordingState::Idle)),
            browser: None,
            stream: None,
            recorder: None,
            recorder_events: None,
            encoding: None,
            chunks: Vec::new(),
            artifact: None,
            event_tx,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current state snapshot
    pub fn state(&self) -> RecordingState {
        *self.state.read()
    }

    /// Whether a recorder is bound; controls stay inert until it is
    pub fn is_initialized(&self) -> bool {
        self.recorder.is_some()
    }

    pub fn browser(&self) -> Option<&BrowserIdentity> {
        self.browser.as_ref()
    }

    pub fn stream(&self) -> Option<&dyn MediaStream> {
        self.stream.as_deref()
    }

    pub fn encoding(&self) -> Option<&EncodingChoice> {
        self.encoding.as_ref()
    }

    /// Artifact published by the last stop, if any
    pub fn artifact(&self) -> Option<&RecordingArtifact> {
        self.artifact.as_ref()
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Acquire a stream and bind a recorder to it.
    ///
    /// Missing platform APIs and acquisition rejections report through the
    /// same diagnostic path: logged, the session stays uninitialized, and
    /// there is no retry.
    pub async fn initialize(&mut self, user_agent: &str) -> Result<(), RecorderError> {
        match self.try_initialize(user_agent).await {
            Ok(()) => {
                *self.state.write() = RecordingState::Idle;
                let _ = self.event_tx.send(SessionEvent::Initialized);
                tracing::info!(session = %self.id, "Recorder initialized");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(session = %self.id, "Recorder unavailable: {}", e);
                let _ = self.event_tx.send(SessionEvent::Error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn try_initialize(&mut self, user_agent: &str) -> Result<(), RecorderError> {
        let platform = self.platform.clone();
        let devices = platform.media_devices().ok_or_else(|| {
            RecorderError::CapabilityMissing(
                "stream acquisition is not supported here, use the latest version of Firefox or Chrome"
                    .to_string(),
            )
        })?;
        let recorders = platform.recorders().ok_or_else(|| {
            RecorderError::CapabilityMissing(
                "media recording is not supported here, use the latest version of Firefox or Chrome"
                    .to_string(),
            )
        })?;

        let identity = browser::resolve(user_agent);
        let constraints = constraints_for(&identity, &self.policy);
        tracing::debug!(browser = %identity.name, "Acquiring stream with {:?}", constraints);

        // An acquisition rejection is handled like a missing API: reported
        // once, never retried.
        let stream = devices.acquire(&constraints).await.map_err(|e| {
            RecorderError::CapabilityMissing(format!("stream acquisition failed: {}", e))
        })?;

        let encoding = negotiate(platform.encoding_support());
        let (recorder, events) =
            recorders.create(stream.clone(), Some(encoding.mime_type.as_str()))?;
        tracing::info!(
            session = %self.id,
            mime = %recorder.mime_type(),
            "Bound recorder to stream {}",
            stream.id()
        );

        // Re-initialization is the one point where buffered data and the
        // previous artifact are discarded.
        self.browser = Some(identity);
        self.stream = Some(stream);
        self.recorder = Some(recorder);
        self.recorder_events = Some(events);
        self.encoding = Some(encoding);
        self.chunks.clear();
        self.artifact = None;
        Ok(())
    }

    /// Begin recording. Guarded no-op unless idle with a bound recorder.
    pub fn start(&mut self) {
        if self.state() != RecordingState::Idle {
            tracing::debug!(session = %self.id, "Ignoring start outside idle state");
            return;
        }
        let Some(recorder) = self.recorder.as_mut() else {
            tracing::debug!(session = %self.id, "Ignoring start before initialization");
            return;
        };

        if let Err(e) = recorder.start(DATA_INTERVAL_MS) {
            tracing::warn!(session = %self.id, "Recorder failed to start: {}", e);
            let _ = self.event_tx.send(SessionEvent::Error(e.to_string()));
            return;
        }

        *self.state.write() = RecordingState::Recording;
        let _ = self.event_tx.send(SessionEvent::Started);
        tracing::info!(session = %self.id, "Recording started");
    }

    /// Stop recording and publish the artifact. Guarded no-op unless
    /// recording.
    pub fn stop(&mut self) {
        if self.state() != RecordingState::Recording {
            tracing::debug!(session = %self.id, "Ignoring stop outside recording state");
            return;
        }
        let Some(recorder) = self.recorder.as_mut() else {
            return;
        };

        if let Err(e) = recorder.stop() {
            tracing::warn!(session = %self.id, "Recorder failed to stop: {}", e);
            let _ = self.event_tx.send(SessionEvent::Error(e.to_string()));
            return;
        }

        // The recorder flushes its remaining data and reports back; deliver
        // whatever has already arrived so the stop reaction can run.
        self.pump_events();
    }

    /// Deliver recorder events that arrived since the last poll, in order
    pub fn pump_events(&mut self) {
        let Some(events) = self.recorder_events.as_mut() else {
            return;
        };
        let mut pending = Vec::new();
        while let Ok(event) = events.try_recv() {
            pending.push(event);
        }
        for event in pending {
            self.handle_recorder_event(event);
        }
    }

    /// Reaction entry point for a single recorder event
    pub fn handle_recorder_event(&mut self, event: RecorderEvent) {
        match event {
            RecorderEvent::DataAvailable(segment) => self.on_data_available(segment),
            RecorderEvent::Stopped => self.on_recorder_stopped(),
        }
    }

    fn on_data_available(&mut self, segment: Bytes) {
        // Empty segments carry no media data.
        if segment.is_empty() {
            return;
        }
        self.chunks.push(segment);
    }

    fn on_recorder_stopped(&mut self) {
        if self.state() != RecordingState::Recording {
            tracing::debug!(session = %self.id, "Ignoring recorder stop outside recording state");
            return;
        }

        let mime_type = self
            .recorder
            .as_ref()
            .map(|recorder| recorder.mime_type().to_string())
            .unwrap_or_default();
        let container = self
            .encoding
            .as_ref()
            .map(|encoding| encoding.container)
            .unwrap_or(Container::Webm);

        match self.platform.blobs().publish(&self.chunks, &mime_type) {
            Ok(blob) => {
                let artifact = RecordingArtifact::new(
                    blob.url,
                    output_file_name(container),
                    mime_type,
                    blob.size_bytes,
                );
                tracing::info!(
                    session = %self.id,
                    name = %artifact.file_name,
                    bytes = artifact.size_bytes,
                    "Recording stopped"
                );
                self.artifact = Some(artifact);
            }
            Err(e) => {
                tracing::warn!(session = %self.id, "Failed to publish recording: {}", e);
                let _ = self.event_tx.send(SessionEvent::Error(e.to_string()));
            }
        }

        // The recorder is finished either way; a new recording requires
        // re-initialization.
        *self.state.write() = RecordingState::Stopped;
        let _ = self.event_tx.send(SessionEvent::Stopped);
    }
}
