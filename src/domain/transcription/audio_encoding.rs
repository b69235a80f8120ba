//! Audio encoding value object and Content-Type mapping

use std::fmt;

use serde::Serialize;

use crate::domain::error::UnsupportedContentTypeError;

/// Content-Type substrings and the encoding each one maps to.
/// Checked in order; the first match wins.
const CONTENT_TYPE_TABLE: &[(&str, AudioEncoding)] = &[
    ("webm", AudioEncoding::WebmOpus),
    ("ogg", AudioEncoding::OggOpus),
    ("mp4", AudioEncoding::Mp4Audio),
];

/// Provider codec identifiers for the audio containers browsers record into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    WebmOpus,
    OggOpus,
    Mp4Audio,
}

impl AudioEncoding {
    /// Resolve the encoding for a Content-Type header value.
    ///
    /// Matching is a case-insensitive substring search, so parameters such as
    /// `;codecs=opus` are tolerated.
    pub fn from_content_type(content_type: &str) -> Result<Self, UnsupportedContentTypeError> {
        let lower = content_type.to_ascii_lowercase();
        CONTENT_TYPE_TABLE
            .iter()
            .find(|(needle, _)| lower.contains(needle))
            .map(|(_, encoding)| *encoding)
            .ok_or_else(|| UnsupportedContentTypeError {
                content_type: content_type.to_string(),
            })
    }

    /// Get the provider identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WebmOpus => "WEBM_OPUS",
            Self::OggOpus => "OGG_OPUS",
            Self::Mp4Audio => "MP4_AUDIO",
        }
    }
}

impl fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
