//! Platform service trait definitions
//!
//! Seams for the platform-provided capabilities the widget consumes: stream
//! acquisition, media recording, encoding support queries, and blob
//! publication. The crate never reimplements these; hosts supply real
//! implementations and [`crate::testing`] provides synthetic ones.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::capture::constraints::StreamConstraints;
use crate::utils::error::RecorderError;

/// An acquired media stream handle, exclusively owned by its session
pub trait MediaStream: Send + Sync {
    /// Stable identifier for logging
    fn id(&self) -> &str;

    fn has_audio(&self) -> bool;

    fn has_video(&self) -> bool;
}

/// Asynchronous stream-acquisition service.
///
/// Acquisition may fail (permission denial, no device); callers treat that
/// the same way as a missing API.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    async fn acquire(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Arc<dyn MediaStream>, RecorderError>;
}

/// Event delivered by an active recorder.
///
/// Events arrive in production order and the session preserves that order
/// when buffering segments.
#[derive(Debug, Clone)]
pub enum RecorderEvent {
    /// One encoded media segment became available
    DataAvailable(Bytes),
    /// The recorder finished flushing after a stop request
    Stopped,
}

/// An active recorder bound to a stream
pub trait MediaRecorder: Send + Sync {
    /// Begin recording. The recorder emits a data segment at least every
    /// `timeslice_ms` milliseconds while recording continues.
    fn start(&mut self, timeslice_ms: u64) -> Result<(), RecorderError>;

    /// Request a stop. The recorder flushes remaining data and then emits
    /// [`RecorderEvent::Stopped`].
    fn stop(&mut self) -> Result<(), RecorderError>;

    /// The encoding the recorder actually negotiated
    fn mime_type(&self) -> &str;
}

/// Constructs recorders bound to acquired streams
pub trait RecorderFactory: Send + Sync {
    /// Create a recorder for `stream`, optionally requesting an encoding.
    /// The receiver delivers the recorder's events in production order.
    fn create(
        &self,
        stream: Arc<dyn MediaStream>,
        preferred_mime: Option<&str>,
    ) -> Result<(Box<dyn MediaRecorder>, mpsc::UnboundedReceiver<RecorderEvent>), RecorderError>;
}

/// Mime-type support queries
pub trait EncodingSupport: Send + Sync {
    fn is_supported(&self, mime_type: &str) -> bool;
}

/// A published artifact reachable at `url`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedBlob {
    pub url: String,
    pub size_bytes: u64,
}

/// Combines ordered binary segments into a single artifact behind a
/// dereferenceable URI
pub trait BlobStore: Send + Sync {
    fn publish(&self, segments: &[Bytes], mime_type: &str) -> Result<PublishedBlob, RecorderError>;
}

/// Aggregate of the platform services available to a session.
///
/// `media_devices` and `recorders` return `None` when the platform lacks the
/// corresponding API entirely. `encoding_support` returns `None` when support
/// queries themselves are unavailable, which changes negotiation behavior
/// rather than failing it.
pub trait MediaPlatform: Send + Sync {
    fn media_devices(&self) -> Option<&dyn MediaDevices>;

    fn recorders(&self) -> Option<&dyn RecorderFactory>;

    fn encoding_support(&self) -> Option<&dyn EncodingSupport>;

    fn blobs(&self) -> &dyn BlobStore;
}
