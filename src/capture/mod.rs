//! Stream acquisition support
//!
//! Constraint selection for stream requests, the platform service trait
//! seams, and a file-backed blob store for published artifacts.

pub mod blob;
pub mod constraints;
pub mod traits;

pub use blob::FileBlobStore;
pub use constraints::{constraints_for, CapturePolicy, DimensionRange, StreamConstraints, VideoConstraints};
pub use traits::{
    BlobStore, EncodingSupport, MediaDevices, MediaPlatform, MediaRecorder, MediaStream,
    PublishedBlob, RecorderEvent, RecorderFactory,
};
