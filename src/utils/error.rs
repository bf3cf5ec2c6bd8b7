//! Error types and handling
//!
//! Common error types used across the crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("Capability missing: {0}")]
    CapabilityMissing(String),

    #[error("Stream acquisition failed: {0}")]
    Acquisition(String),

    #[error("Recorder error: {0}")]
    Recorder(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response for the frontend
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<RecorderError> for ErrorResponse {
    fn from(error: RecorderError) -> Self {
        let code = match &error {
            RecorderError::CapabilityMissing(_) => "CAPABILITY_MISSING",
            RecorderError::Acquisition(_) => "ACQUISITION_FAILED",
            RecorderError::Recorder(_) => "RECORDER_ERROR",
            RecorderError::Artifact(_) => "ARTIFACT_ERROR",
            RecorderError::Io(_) => "IO_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type alias using RecorderError
pub type RecorderResult<T> = Result<T, RecorderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_codes() {
        let response: ErrorResponse =
            RecorderError::CapabilityMissing("no media devices".to_string()).into();
        assert_eq!(response.code, "CAPABILITY_MISSING");
        assert!(response.message.contains("no media devices"));

        let response: ErrorResponse =
            RecorderError::Acquisition("permission denied".to_string()).into();
        assert_eq!(response.code, "ACQUISITION_FAILED");
    }

    #[test]
    fn test_error_response_serializes() {
        let response: ErrorResponse = RecorderError::Recorder("start failed".to_string()).into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["code"], "RECORDER_ERROR");
    }
}
