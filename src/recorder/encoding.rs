//! Encoding capability negotiation
//!
//! Picks the best codec/container combination the platform confirms support
//! for, from a fixed preference order. Platforms without a support-query
//! capability skip negotiation entirely and are handed mp4 directly.

use serde::{Deserialize, Serialize};

use crate::capture::traits::EncodingSupport;

const MP4_MIME: &str = "video/mp4";

/// Output container format, distinct from the codec inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Webm,
    Mp4,
}

impl Container {
    /// File extension for artifacts in this container
    pub fn extension(&self) -> &'static str {
        match self {
            Container::Webm => "webm",
            Container::Mp4 => "mp4",
        }
    }
}

/// Negotiated encoding configuration, fixed for the life of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingChoice {
    pub mime_type: String,
    pub container: Container,
}

impl EncodingChoice {
    fn new(mime_type: &str, container: Container) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            container,
        }
    }

    /// The unconditional fallback when nothing else is confirmed supported
    pub fn mp4() -> Self {
        Self::new(MP4_MIME, Container::Mp4)
    }
}

/// Candidate encodings in preference order, best first
pub const ENCODING_PREFERENCES: [(&str, Container); 4] = [
    ("video/webm;codecs=vp9", Container::Webm),
    ("video/webm;codecs=h264", Container::Webm),
    ("video/webm", Container::Webm),
    (MP4_MIME, Container::Mp4),
];

/// Select the best supported encoding.
///
/// With a support query available, the first confirmed candidate wins and
/// mp4 is the fallback when none is confirmed. Without a support query there
/// is nothing to ask; mp4 is requested directly.
pub fn negotiate(support: Option<&dyn EncodingSupport>) -> EncodingChoice {
    let Some(support) = support else {
        return EncodingChoice::mp4();
    };

    for (mime_type, container) in ENCODING_PREFERENCES {
        if support.is_supported(mime_type) {
            return EncodingChoice::new(mime_type, container);
        }
    }
    EncodingChoice::mp4()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticEncodingSupport;

    #[test]
    fn test_first_supported_candidate_wins() {
        // Every combination of the three webm support flags must pick the
        // first supported candidate in preference order.
        for mask in 0u8..8 {
            let vp9 = mask & 4 != 0;
            let h264 = mask & 2 != 0;
            let webm = mask & 1 != 0;

            let mut supported = Vec::new();
            if vp9 {
                supported.push("video/webm;codecs=vp9");
            }
            if h264 {
                supported.push("video/webm;codecs=h264");
            }
            if webm {
                supported.push("video/webm");
            }
            let support = StaticEncodingSupport::new(supported.clone());

            let choice = negotiate(Some(&support));
            let expected = if vp9 {
                EncodingChoice {
                    mime_type: "video/webm;codecs=vp9".to_string(),
                    container: Container::Webm,
                }
            } else if h264 {
                EncodingChoice {
                    mime_type: "video/webm;codecs=h264".to_string(),
                    container: Container::Webm,
                }
            } else if webm {
                EncodingChoice {
                    mime_type: "video/webm".to_string(),
                    container: Container::Webm,
                }
            } else {
                EncodingChoice::mp4()
            };
            assert_eq!(choice, expected, "support flags {:?}", supported);
        }
    }

    #[test]
    fn test_plain_webm_only() {
        let support = StaticEncodingSupport::new(["video/webm"]);
        let choice = negotiate(Some(&support));
        assert_eq!(choice.mime_type, "video/webm");
        assert_eq!(choice.container, Container::Webm);
    }

    #[test]
    fn test_mp4_support_is_honored() {
        let support = StaticEncodingSupport::new(["video/mp4"]);
        let choice = negotiate(Some(&support));
        assert_eq!(choice, EncodingChoice::mp4());
    }

    #[test]
    fn test_no_support_query_requests_mp4_directly() {
        let choice = negotiate(None);
        assert_eq!(choice.mime_type, "video/mp4");
        assert_eq!(choice.container, Container::Mp4);
    }

    #[test]
    fn test_container_extensions() {
        assert_eq!(Container::Webm.extension(), "webm");
        assert_eq!(Container::Mp4.extension(), "mp4");
    }
}
