//! Audio payload value object

use super::AudioEncoding;

/// Value object representing one uploaded audio payload.
/// Contains raw audio bytes and the encoding resolved from its Content-Type.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    data: Vec<u8>,
    encoding: AudioEncoding,
}

impl AudioPayload {
    /// Create a payload from raw bytes
    pub fn new(data: impl Into<Vec<u8>>, encoding: AudioEncoding) -> Self {
        Self {
            data: data.into(),
            encoding,
        }
    }

    /// Get the raw audio data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the encoding
    pub fn encoding(&self) -> AudioEncoding {
        self.encoding
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Encode the audio data as base64
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}
