//! Open Recorder - in-app camera & screen recording widget, made simple.
//!
//! Backend for a recording widget: resolves the embedding browser identity,
//! selects stream constraints for it, negotiates a codec/container
//! combination against the platform's support queries, and drives the
//! recording session lifecycle, publishing the result as a downloadable
//! artifact.
//!
//! Platform capabilities (stream acquisition, media recording, support
//! queries, blob publication) are consumed through the traits in
//! [`capture::traits`]; hosts plug in real implementations and [`testing`]
//! provides deterministic synthetic ones.
//!
//! # Usage
//! ```rust,ignore
//! tauri::Builder::default()
//!     .plugin(open_recorder::init())
//!     .manage(open_recorder::commands::recording::RecorderState::default())
//!     .run(tauri::generate_context!())
//!     .expect("error while running tauri application");
//! ```

pub mod browser;
pub mod capture;
pub mod commands;
pub mod recorder;
pub mod testing;
pub mod utils;

use tauri::{
    plugin::{Builder, TauriPlugin},
    Runtime,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-exports for convenience
pub use browser::BrowserIdentity;
pub use capture::constraints::{CapturePolicy, StreamConstraints};
pub use capture::traits::MediaPlatform;
pub use recorder::encoding::{Container, EncodingChoice};
pub use recorder::session::{RecordingSession, SessionEvent};
pub use recorder::state::{RecordingArtifact, RecordingState};
pub use utils::error::RecorderError;

/// Initialize the recording widget plugin with all commands
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("open-recorder")
        .invoke_handler(tauri::generate_handler![
            // System commands
            commands::system::get_system_info,
            commands::system::detect_browser,
            // Recording commands
            commands::recording::initialize_recorder,
            commands::recording::start_recording,
            commands::recording::stop_recording,
            commands::recording::get_recording_state,
            commands::recording::get_download_info,
        ])
        .build()
}

/// Initialize tracing/logging for the widget
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "open_recorder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
