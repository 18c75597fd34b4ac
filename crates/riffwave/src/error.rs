//! Error types for WAV parsing and loading.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::header::WavHeader;

/// Result type for parse operations.
pub type WavResult<T> = Result<T, WavError>;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WavErrorKind {
    /// Empty buffer, wrong declared MIME type or declared length.
    InvalidInput,
    /// A tag does not match, or the buffer ends inside a field.
    MalformedHeader,
    /// `chunk_size` or `subchunk2_size` disagrees with the buffer layout.
    MalformedChunkSize,
    /// fmt chunk size or sample width this parser does not handle.
    UnsupportedFormat,
    /// fmt fields contradict each other.
    InconsistentFmt,
}

impl WavErrorKind {
    /// Returns the stable error code (e.g., "WAV_001").
    pub fn code(&self) -> &'static str {
        match self {
            WavErrorKind::InvalidInput => "WAV_001",
            WavErrorKind::MalformedHeader => "WAV_002",
            WavErrorKind::MalformedChunkSize => "WAV_003",
            WavErrorKind::UnsupportedFormat => "WAV_004",
            WavErrorKind::InconsistentFmt => "WAV_005",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WavErrorKind::InvalidInput => "invalid input",
            WavErrorKind::MalformedHeader => "malformed header",
            WavErrorKind::MalformedChunkSize => "malformed chunk size",
            WavErrorKind::UnsupportedFormat => "unsupported format",
            WavErrorKind::InconsistentFmt => "inconsistent fmt chunk",
        }
    }
}

impl fmt::Display for WavErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The header field (or input property) a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WavField {
    Buffer,
    DeclaredType,
    DeclaredLength,
    ChunkId,
    ChunkSize,
    Format,
    Subchunk1Id,
    Subchunk1Size,
    AudioFormat,
    NumberOfChannels,
    SampleRate,
    ByteRate,
    BlockAlign,
    BitsPerSample,
    ExtraParamSize,
    ExtraParams,
    Subchunk2Id,
    Subchunk2Size,
}

impl WavField {
    pub fn as_str(&self) -> &'static str {
        match self {
            WavField::Buffer => "buffer",
            WavField::DeclaredType => "declared_type",
            WavField::DeclaredLength => "declared_length",
            WavField::ChunkId => "chunk_id",
            WavField::ChunkSize => "chunk_size",
            WavField::Format => "format",
            WavField::Subchunk1Id => "subchunk1_id",
            WavField::Subchunk1Size => "subchunk1_size",
            WavField::AudioFormat => "audio_format",
            WavField::NumberOfChannels => "number_of_channels",
            WavField::SampleRate => "sample_rate",
            WavField::ByteRate => "byte_rate",
            WavField::BlockAlign => "block_align",
            WavField::BitsPerSample => "bits_per_sample",
            WavField::ExtraParamSize => "extra_param_size",
            WavField::ExtraParams => "extra_params",
            WavField::Subchunk2Id => "subchunk2_id",
            WavField::Subchunk2Size => "subchunk2_size",
        }
    }
}

impl fmt::Display for WavField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation failure attributed to one field.
///
/// `partial` holds every field decoded before the failure; the rest are defaults.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} ({field}): {message}")]
pub struct WavError {
    pub kind: WavErrorKind,
    pub field: WavField,
    pub message: String,
    pub partial: Box<WavHeader>,
}

impl WavError {
    pub fn new(
        kind: WavErrorKind,
        field: WavField,
        message: impl Into<String>,
        partial: &WavHeader,
    ) -> Self {
        Self {
            kind,
            field,
            message: message.into(),
            partial: Box::new(partial.clone()),
        }
    }

    /// Returns the stable error code of this failure's kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Errors from acquiring a file and parsing it.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read; the parser never ran.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is larger than this platform can address.
    #[error("{} is too large to load: {size} bytes", path.display())]
    TooLarge { path: PathBuf, size: u64 },

    /// The bytes were read but are not a valid WAV file.
    #[error(transparent)]
    Parse(#[from] WavError),
}

impl LoadError {
    /// Returns the validation error, if the failure happened after the read.
    pub fn as_wav_error(&self) -> Option<&WavError> {
        match self {
            LoadError::Parse(err) => Some(err),
            LoadError::Read { .. } | LoadError::TooLarge { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let kinds = [
            WavErrorKind::InvalidInput,
            WavErrorKind::MalformedHeader,
            WavErrorKind::MalformedChunkSize,
            WavErrorKind::UnsupportedFormat,
            WavErrorKind::InconsistentFmt,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_error_display() {
        let err = WavError::new(
            WavErrorKind::MalformedHeader,
            WavField::ChunkId,
            "expected 'RIFF', got 'RIFX'",
            &WavHeader::default(),
        );
        assert_eq!(
            err.to_string(),
            "malformed header (chunk_id): expected 'RIFF', got 'RIFX'"
        );
        assert_eq!(err.code(), "WAV_002");
    }

    #[test]
    fn test_load_error_read_has_no_wav_error() {
        let err = LoadError::Read {
            path: PathBuf::from("missing.wav"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.as_wav_error().is_none());
        assert!(err.to_string().starts_with("failed to read missing.wav"));
    }

    #[test]
    fn test_load_error_too_large_display() {
        let err = LoadError::TooLarge {
            path: PathBuf::from("huge.wav"),
            size: u64::MAX,
        };
        assert!(err.as_wav_error().is_none());
        assert_eq!(
            err.to_string(),
            format!("huge.wav is too large to load: {} bytes", u64::MAX)
        );
    }
}
