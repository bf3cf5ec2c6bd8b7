//! Recording system module
//!
//! This module implements the recording lifecycle:
//! - encoding negotiation over platform support queries
//! - the session state machine reacting to commands and recorder events
//! - state and artifact types shared with the frontend

pub mod encoding;
pub mod session;
pub mod state;

pub use encoding::{negotiate, Container, EncodingChoice};
pub use session::{RecordingSession, SessionEvent, DATA_INTERVAL_MS};
pub use state::{RecordingArtifact, RecordingState};
