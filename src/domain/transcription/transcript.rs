//! Recognition results and transcript assembly

use std::fmt;

/// One provider result segment with its alternatives, best first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionSegment {
    alternatives: Vec<String>,
}

impl RecognitionSegment {
    pub fn new(alternatives: Vec<String>) -> Self {
        Self { alternatives }
    }

    /// Segment with a single alternative
    pub fn single(transcript: impl Into<String>) -> Self {
        Self {
            alternatives: vec![transcript.into()],
        }
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Top-ranked alternative, if the provider returned one
    pub fn best(&self) -> Option<&str> {
        self.alternatives.first().map(String::as_str)
    }
}

/// Final transcript returned to the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    /// Join the best alternative of each segment with newlines.
    ///
    /// No segments, or a first segment without an alternative, yields an
    /// empty transcript. Later segments without an alternative are skipped.
    pub fn from_segments(segments: &[RecognitionSegment]) -> Self {
        match segments.first() {
            Some(first) if first.best().is_some() => {}
            _ => return Self::default(),
        }

        let text = segments
            .iter()
            .filter_map(RecognitionSegment::best)
            .collect::<Vec<_>>()
            .join("\n");

        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
