//! Recording-related Tauri commands
//!
//! The thin control surface bound to session state: initialize, start,
//! stop, and the derived download affordance. The frontend disables each
//! control when the reported status says it does not apply.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tauri::State;
use tokio::sync::Mutex;

use crate::browser::BrowserIdentity;
use crate::capture::constraints::CapturePolicy;
use crate::capture::traits::MediaPlatform;
use crate::recorder::session::RecordingSession;
use crate::recorder::state::{RecordingArtifact, RecordingState};

/// Application state for the recording widget
pub struct RecorderState {
    pub session: Arc<Mutex<RecordingSession>>,
}

impl RecorderState {
    /// Build widget state on top of a host-supplied platform
    pub fn new(platform: Arc<dyn MediaPlatform>, policy: CapturePolicy) -> Self {
        Self {
            session: Arc::new(Mutex::new(RecordingSession::new(platform, policy))),
        }
    }
}

impl Default for RecorderState {
    /// Synthetic offline platform; hosts wire a real one via
    /// [`RecorderState::new`].
    fn default() -> Self {
        Self::new(
            Arc::new(crate::testing::SyntheticPlatform::new()),
            CapturePolicy::default(),
        )
    }
}

/// Session status reported to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub state: RecordingState,
    pub initialized: bool,
    pub browser: Option<BrowserIdentity>,
    pub download: Option<RecordingArtifact>,
}

fn status_of(session: &RecordingSession) -> SessionStatus {
    SessionStatus {
        state: session.state(),
        initialized: session.is_initialized(),
        browser: session.browser().cloned(),
        download: session.artifact().cloned(),
    }
}

/// Initialize the recorder for the embedding user agent.
///
/// Initialization failure is a diagnostic, not a command error: the status
/// comes back uninitialized and the controls stay inert.
#[tauri::command]
pub async fn initialize_recorder(
    state: State<'_, RecorderState>,
    user_agent: String,
) -> Result<SessionStatus, String> {
    let mut session = state.session.lock().await;
    if let Err(e) = session.initialize(&user_agent).await {
        tracing::warn!("Recorder initialization failed: {}", e);
    }
    Ok(status_of(&session))
}

/// Start recording
#[tauri::command]
pub async fn start_recording(state: State<'_, RecorderState>) -> Result<SessionStatus, String> {
    let mut session = state.session.lock().await;
    session.start();
    Ok(status_of(&session))
}

/// Stop recording
#[tauri::command]
pub async fn stop_recording(state: State<'_, RecorderState>) -> Result<SessionStatus, String> {
    let mut session = state.session.lock().await;
    session.stop();
    Ok(status_of(&session))
}

/// Current session status; delivers pending recorder events first
#[tauri::command]
pub async fn get_recording_state(
    state: State<'_, RecorderState>,
) -> Result<SessionStatus, String> {
    let mut session = state.session.lock().await;
    session.pump_events();
    Ok(status_of(&session))
}

/// Download affordance, present once an artifact exists
#[tauri::command]
pub async fn get_download_info(
    state: State<'_, RecorderState>,
) -> Result<Option<RecordingArtifact>, String> {
    let session = state.session.lock().await;
    Ok(session.artifact().cloned())
}
