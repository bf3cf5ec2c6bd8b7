//! Synthetic platform implementations for offline testing
//!
//! Deterministic stand-ins for the platform-provided services, so the
//! session lifecycle can be exercised without real devices or encoders.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::capture::constraints::StreamConstraints;
use crate::capture::traits::{
    BlobStore, EncodingSupport, MediaDevices, MediaPlatform, MediaRecorder, MediaStream,
    PublishedBlob, RecorderEvent, RecorderFactory,
};
use crate::utils::error::RecorderError;

/// Stream handle produced by [`SyntheticDevices`]
pub struct SyntheticStream {
    id: String,
    audio: bool,
}

impl MediaStream for SyntheticStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn has_audio(&self) -> bool {
        self.audio
    }

    fn has_video(&self) -> bool {
        true
    }
}

/// Always-succeeding acquisition service
pub struct SyntheticDevices;

#[async_trait]
impl MediaDevices for SyntheticDevices {
    async fn acquire(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Arc<dyn MediaStream>, RecorderError> {
        Ok(Arc::new(SyntheticStream {
            id: format!("synthetic-{}", Uuid::new_v4()),
            audio: constraints.audio,
        }))
    }
}

/// Acquisition service that always rejects, for denial-path tests
pub struct DeniedDevices;

#[async_trait]
impl MediaDevices for DeniedDevices {
    async fn acquire(
        &self,
        _constraints: &StreamConstraints,
    ) -> Result<Arc<dyn MediaStream>, RecorderError> {
        Err(RecorderError::Acquisition("permission denied".to_string()))
    }
}

/// Recorder that plays back a scripted chunk plan.
///
/// All planned segments are delivered on start, as if one arrived per
/// timeslice; stop emits the stopped event.
pub struct SyntheticRecorder {
    mime_type: String,
    plan: Vec<Bytes>,
    events: mpsc::UnboundedSender<RecorderEvent>,
    start_calls: Arc<AtomicUsize>,
}

impl MediaRecorder for SyntheticRecorder {
    fn start(&mut self, _timeslice_ms: u64) -> Result<(), RecorderError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        for segment in self.plan.drain(..) {
            let _ = self.events.send(RecorderEvent::DataAvailable(segment));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RecorderError> {
        let _ = self.events.send(RecorderEvent::Stopped);
        Ok(())
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Factory producing [`SyntheticRecorder`]s and counting start calls
pub struct SyntheticRecorderFactory {
    plan: Vec<Vec<u8>>,
    start_calls: Arc<AtomicUsize>,
}

impl SyntheticRecorderFactory {
    pub fn new(plan: Vec<Vec<u8>>) -> Self {
        Self {
            plan,
            start_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Total recorder start invocations across all created recorders
    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }
}

impl RecorderFactory for SyntheticRecorderFactory {
    fn create(
        &self,
        _stream: Arc<dyn MediaStream>,
        preferred_mime: Option<&str>,
    ) -> Result<(Box<dyn MediaRecorder>, mpsc::UnboundedReceiver<RecorderEvent>), RecorderError>
    {
        let (events, receiver) = mpsc::unbounded_channel();
        let recorder = SyntheticRecorder {
            mime_type: preferred_mime.unwrap_or("video/webm").to_string(),
            plan: self.plan.iter().cloned().map(Bytes::from).collect(),
            events,
            start_calls: self.start_calls.clone(),
        };
        Ok((Box::new(recorder), receiver))
    }
}

/// Support query answering from a fixed set of supported mime types
pub struct StaticEncodingSupport {
    supported: Vec<String>,
}

impl StaticEncodingSupport {
    pub fn new<I, S>(supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported: supported.into_iter().map(Into::into).collect(),
        }
    }
}

impl EncodingSupport for StaticEncodingSupport {
    fn is_supported(&self, mime_type: &str) -> bool {
        self.supported.iter().any(|mime| mime == mime_type)
    }
}

/// Blob store keeping published artifacts in memory
#[derive(Default)]
pub struct MemoryBlobStore {
    published: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes previously published under `url`
    pub fn contents(&self, url: &str) -> Option<Vec<u8>> {
        self.published.lock().get(url).cloned()
    }
}

impl BlobStore for MemoryBlobStore {
    fn publish(&self, segments: &[Bytes], _mime_type: &str) -> Result<PublishedBlob, RecorderError> {
        let mut data = Vec::new();
        for segment in segments {
            data.extend_from_slice(segment);
        }
        let url = format!("memory://{}", Uuid::new_v4());
        let size_bytes = data.len() as u64;
        self.published.lock().insert(url.clone(), data);
        Ok(PublishedBlob { url, size_bytes })
    }
}

/// Complete synthetic platform with toggleable capabilities.
///
/// The default configuration has every capability present, full webm
/// support, and a small deterministic chunk plan.
pub struct SyntheticPlatform {
    devices: Option<Box<dyn MediaDevices>>,
    recorders: Option<SyntheticRecorderFactory>,
    support: Option<StaticEncodingSupport>,
    blobs: MemoryBlobStore,
}

impl SyntheticPlatform {
    pub fn new() -> Self {
        Self {
            devices: Some(Box::new(SyntheticDevices)),
            recorders: Some(SyntheticRecorderFactory::new(vec![
                b"synthetic-segment-0".to_vec(),
                b"synthetic-segment-1".to_vec(),
            ])),
            support: Some(StaticEncodingSupport::new([
                "video/webm;codecs=vp9",
                "video/webm;codecs=h264",
                "video/webm",
            ])),
            blobs: MemoryBlobStore::new(),
        }
    }

    /// Replace the scripted chunk plan
    pub fn with_plan(mut self, plan: Vec<Vec<u8>>) -> Self {
        self.recorders = Some(SyntheticRecorderFactory::new(plan));
        self
    }

    /// Replace the supported mime-type set
    pub fn with_support<I, S>(mut self, supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.support = Some(StaticEncodingSupport::new(supported));
        self
    }

    /// Drop the stream-acquisition capability entirely
    pub fn without_media_devices(mut self) -> Self {
        self.devices = None;
        self
    }

    /// Drop the media-recording capability entirely
    pub fn without_recorders(mut self) -> Self {
        self.recorders = None;
        self
    }

    /// Drop the support-query capability, triggering the mp4 fast path
    pub fn without_encoding_support(mut self) -> Self {
        self.support = None;
        self
    }

    /// Make acquisition reject, as a permission denial would
    pub fn with_denied_acquisition(mut self) -> Self {
        self.devices = Some(Box::new(DeniedDevices));
        self
    }

    /// Bytes published under `url` by the in-memory store
    pub fn published(&self, url: &str) -> Option<Vec<u8>> {
        self.blobs.contents(url)
    }

    /// Total recorder start invocations
    pub fn recorder_start_calls(&self) -> usize {
        self.recorders
            .as_ref()
            .map(|factory| factory.start_calls())
            .unwrap_or(0)
    }
}

impl Default for SyntheticPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPlatform for SyntheticPlatform {
    fn media_devices(&self) -> Option<&dyn MediaDevices> {
        self.devices.as_deref()
    }

    fn recorders(&self) -> Option<&dyn RecorderFactory> {
        self.recorders
            .as_ref()
            .map(|factory| factory as &dyn RecorderFactory)
    }

    fn encoding_support(&self) -> Option<&dyn EncodingSupport> {
        self.support
            .as_ref()
            .map(|support| support as &dyn EncodingSupport)
    }

    fn blobs(&self) -> &dyn BlobStore {
        &self.blobs
    }
}
