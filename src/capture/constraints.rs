//! Stream constraint selection
//!
//! Maps a resolved browser identity to the audio/video acquisition
//! parameters used when requesting a media stream. Only Chrome and Firefox
//! get tailored configurations, reflecting media-recording support at the
//! time; every other identity falls back to permissive defaults, which means
//! acquisition is still attempted, not refused.

use serde::{Deserialize, Serialize};

use crate::browser::BrowserIdentity;

/// Bounds for one video dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub min: u32,
    pub ideal: u32,
    pub max: u32,
}

/// Video acquisition constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum VideoConstraints {
    /// Pinned resolution (the legacy mandatory-constraint dictionary shape)
    Exact { width: u32, height: u32 },
    /// Ranged resolution around an ideal target
    Range {
        width: DimensionRange,
        height: DimensionRange,
    },
}

/// Desired acquisition parameters for a stream request.
///
/// The default value carries no constraints at all: acquisition proceeds
/// with whatever the platform considers permissive defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamConstraints {
    pub audio: bool,
    pub video: Option<VideoConstraints>,
}

/// Resolution target and audio policy applied by the selector.
///
/// Historically these numbers lived inline in two diverged copies of the
/// selector; they are one explicit parameter here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePolicy {
    pub target_width: u32,
    pub target_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub audio: bool,
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self {
            target_width: 320,
            target_height: 240,
            max_width: 1280,
            max_height: 720,
            audio: true,
        }
    }
}

impl CapturePolicy {
    /// Policy recording video only
    pub fn video_only() -> Self {
        Self {
            audio: false,
            ..Self::default()
        }
    }

    /// Set the target resolution
    pub fn with_target(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    /// Set the upper resolution bound used by ranged constraints
    pub fn with_max(mut self, width: u32, height: u32) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }
}

/// Select stream constraints for a browser identity.
///
/// Selection is an exact match on the identity name. Chrome takes the pinned
/// dictionary shape, Firefox the ranged shape; anything else gets
/// [`StreamConstraints::default`].
pub fn constraints_for(identity: &BrowserIdentity, policy: &CapturePolicy) -> StreamConstraints {
    match identity.name.as_str() {
        "Chrome" => StreamConstraints {
            audio: policy.audio,
            video: Some(VideoConstraints::Exact {
                width: policy.target_width,
                height: policy.target_height,
            }),
        },
        "Firefox" => StreamConstraints {
            audio: policy.audio,
            video: Some(VideoConstraints::Range {
                width: DimensionRange {
                    min: policy.target_width,
                    ideal: policy.target_width,
                    max: policy.max_width,
                },
                height: DimensionRange {
                    min: policy.target_height,
                    ideal: policy.target_height,
                    max: policy.max_height,
                },
            }),
        },
        _ => StreamConstraints::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> BrowserIdentity {
        BrowserIdentity {
            name: name.to_string(),
            kind: name.to_lowercase(),
            version: String::new(),
        }
    }

    #[test]
    fn test_chrome_gets_pinned_resolution() {
        let constraints = constraints_for(&identity("Chrome"), &CapturePolicy::default());
        assert_eq!(
            constraints.video,
            Some(VideoConstraints::Exact {
                width: 320,
                height: 240
            })
        );
    }

    #[test]
    fn test_firefox_gets_ranged_resolution_with_audio() {
        let constraints = constraints_for(&identity("Firefox"), &CapturePolicy::default());
        assert!(constraints.audio);
        assert_eq!(
            constraints.video,
            Some(VideoConstraints::Range {
                width: DimensionRange {
                    min: 320,
                    ideal: 320,
                    max: 1280
                },
                height: DimensionRange {
                    min: 240,
                    ideal: 240,
                    max: 720
                },
            })
        );
    }

    #[test]
    fn test_other_identities_get_defaults() {
        for name in ["Safari", "Microsoft Edge", "Opera", "Android", ""] {
            let constraints = constraints_for(&identity(name), &CapturePolicy::default());
            assert_eq!(constraints, StreamConstraints::default());
        }
    }

    #[test]
    fn test_policy_overrides_apply() {
        let policy = CapturePolicy::video_only().with_target(640, 480).with_max(1920, 1080);
        let constraints = constraints_for(&identity("Firefox"), &policy);
        assert!(!constraints.audio);
        match constraints.video {
            Some(VideoConstraints::Range { width, height }) => {
                assert_eq!(width.ideal, 640);
                assert_eq!(width.max, 1920);
                assert_eq!(height.ideal, 480);
                assert_eq!(height.max, 1080);
            }
            other => panic!("expected ranged constraints, got {:?}", other),
        }
    }
}
