//! Parser configuration.

use serde::{Deserialize, Serialize};

/// The MIME type a WAV buffer must be declared with.
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// How the end of the data region is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataBounds {
    /// `[start, start + subchunk2_size)`.
    #[default]
    Exact,
    /// `[start, subchunk2_size)`, treating the size as an absolute end offset.
    ///
    /// The end is clamped to the buffer and the slice is empty when it precedes the
    /// start. Kept for byte-for-byte comparison with older tooling.
    Legacy,
}

/// Options for [`parse_with`](super::parse_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    pub data_bounds: DataBounds,
    pub expected_mime: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            data_bounds: DataBounds::Exact,
            expected_mime: WAV_MIME_TYPE.to_string(),
        }
    }
}

impl ParseOptions {
    /// Sets the data slice bounds mode.
    pub fn data_bounds(mut self, data_bounds: DataBounds) -> Self {
        self.data_bounds = data_bounds;
        self
    }

    /// Sets the required declared MIME type.
    pub fn expected_mime(mut self, mime: impl Into<String>) -> Self {
        self.expected_mime = mime.into();
        self
    }

    /// Parses options from a JSON document; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
