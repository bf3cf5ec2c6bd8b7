//! Recording state and artifact types
//!
//! Defines the session state machine states and the downloadable artifact
//! produced at the recording-to-stopped transition.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::recorder::encoding::Container;

/// Current state of a recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    /// Not recording
    Idle,
    /// Currently recording
    Recording,
    /// A recording finished; terminal for this artifact
    Stopped,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Downloadable artifact produced when a recording stops
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingArtifact {
    /// Dereferenceable URI of the assembled recording
    pub url: String,

    /// Suggested download file name
    pub file_name: String,

    /// Mime type reported by the recorder
    pub mime_type: String,

    /// Total size in bytes
    pub size_bytes: u64,

    /// Unix timestamp (milliseconds) when the artifact was assembled
    pub created_at_ms: u64,
}

impl RecordingArtifact {
    pub fn new(url: String, file_name: String, mime_type: String, size_bytes: u64) -> Self {
        Self {
            url,
            file_name,
            mime_type,
            size_bytes,
            created_at_ms: Utc::now().timestamp_millis() as u64,
        }
    }
}

/// Upper bound (exclusive) for the random file-name suffix
const FILE_NAME_SUFFIX_BOUND: u64 = 10_000_000;

/// Generate a download file name for the given container
pub fn output_file_name(container: Container) -> String {
    let suffix = rand::thread_rng().gen_range(0..FILE_NAME_SUFFIX_BOUND);
    format!("video_{}.{}", suffix, container.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name_shape() {
        for _ in 0..100 {
            let name = output_file_name(Container::Webm);
            let rest = name.strip_prefix("video_").expect("prefix");
            let digits = rest.strip_suffix(".webm").expect("extension");
            let suffix: u64 = digits.parse().expect("numeric suffix");
            assert!(suffix < FILE_NAME_SUFFIX_BOUND);
        }
    }

    #[test]
    fn test_extension_follows_container() {
        assert!(output_file_name(Container::Mp4).ends_with(".mp4"));
        assert!(output_file_name(Container::Webm).ends_with(".webm"));
    }

    #[test]
    fn test_artifact_serializes_camel_case() {
        let artifact = RecordingArtifact::new(
            "file:///tmp/blob-1.webm".to_string(),
            "video_42.webm".to_string(),
            "video/webm".to_string(),
            30,
        );
        let value = serde_json::to_value(&artifact).unwrap();
        assert_eq!(value["fileName"], "video_42.webm");
        assert_eq!(value["sizeBytes"], 30);
        assert!(value["createdAtMs"].as_u64().unwrap() > 0);
    }
}
