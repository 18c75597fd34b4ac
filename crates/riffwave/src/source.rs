//! Asynchronous file acquisition.
//!
//! The read is the only I/O in this crate: [`read_source`] resolves once with the whole
//! file in memory, and the synchronous parser takes over from there.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::{LoadError, WavResult};
use crate::header::WavDescriptor;
use crate::parser::{parse_with, ParseOptions, WAV_MIME_TYPE};

/// Recognized WAV extensions.
pub const WAV_EXTENSIONS: &[&str] = &["wav", "wave"];

/// Returns the MIME type implied by a file's extension.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let is_wav = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| WAV_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);

    if is_wav {
        WAV_MIME_TYPE
    } else {
        "application/octet-stream"
    }
}

/// Converts a file length from metadata into an in-memory size.
fn declared_size(path: &Path, len: u64) -> Result<usize, LoadError> {
    usize::try_from(len).map_err(|_| LoadError::TooLarge {
        path: path.to_path_buf(),
        size: len,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A file read into memory together with the metadata it was declared with.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
    pub size: usize,
    pub last_modified: Option<SystemTime>,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Wraps an in-memory buffer, declaring its size from the buffer itself.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            size: bytes.len(),
            last_modified: None,
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Overrides the declared MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Runs the parser over the buffer with this file's declared type and size.
    pub fn parse(&self, options: &ParseOptions) -> WavResult<WavDescriptor<'_>> {
        parse_with(&self.bytes, &self.mime_type, self.size, options)
    }
}

/// Reads a file into memory.
///
/// The declared size comes from the file's metadata, so a file that changes between
/// the stat and the read is reported by the parser as a length mismatch.
pub async fn read_source(path: impl AsRef<Path>) -> Result<SourceFile, LoadError> {
    let path = path.as_ref();
    let read_err = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::metadata(path).await.map_err(read_err)?;
    let size = declared_size(path, metadata.len())?;
    let bytes = tokio::fs::read(path).await.map_err(read_err)?;
    debug!(path = %path.display(), len = bytes.len(), "read source file");

    Ok(SourceFile {
        path: path.to_path_buf(),
        name: file_name(path),
        size,
        last_modified: metadata.modified().ok(),
        mime_type: mime_type_for_path(path).to_string(),
        bytes,
    })
}

/// Reads and parses a file, then invokes `notify` exactly once with the outcome.
///
/// A read failure is delivered as [`LoadError::Read`] or [`LoadError::TooLarge`] without
/// running the parser.
/// The callback's return value is passed through.
pub async fn inspect_file<F, R>(path: impl AsRef<Path>, options: &ParseOptions, notify: F) -> R
where
    F: for<'b> FnOnce(&SourceFile, Result<WavDescriptor<'b>, LoadError>) -> R,
{
    let path = path.as_ref();
    match read_source(path).await {
        Ok(source) => {
            let outcome = source.parse(options).map_err(LoadError::from);
            notify(&source, outcome)
        }
        Err(err) => {
            let placeholder = SourceFile {
                path: path.to_path_buf(),
                name: file_name(path),
                size: 0,
                last_modified: None,
                mime_type: mime_type_for_path(path).to_string(),
                bytes: Vec::new(),
            };
            notify(&placeholder, Err(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WavErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn mono_8bit_wav(data_len: usize) -> Vec<u8> {
        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVEfmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes());
        wav.extend_from_slice(&8000u32.to_le_bytes());
        wav.extend_from_slice(&8000u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes());
        wav.extend_from_slice(&8u16.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data_len as u32).to_le_bytes());
        wav.resize(44 + data_len, 0x80);
        wav
    }

    #[test]
    fn test_mime_type_for_path() {
        assert_eq!(mime_type_for_path(Path::new("a.wav")), "audio/wav");
        assert_eq!(mime_type_for_path(Path::new("a.WAVE")), "audio/wav");
        assert_eq!(
            mime_type_for_path(Path::new("a.mp3")),
            "application/octet-stream"
        );
        assert_eq!(
            mime_type_for_path(Path::new("noext")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_declared_size_fits_platform() {
        let path = Path::new("tone.wav");
        assert_eq!(declared_size(path, 8044).unwrap(), 8044);
        assert_eq!(
            declared_size(path, usize::MAX as u64).unwrap(),
            usize::MAX
        );
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_declared_size_too_large_is_load_error() {
        let err = declared_size(Path::new("huge.wav"), u64::from(u32::MAX) + 1).unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { size, .. } if size == u64::from(u32::MAX) + 1));
    }

    #[test]
    fn test_source_from_bytes_parses() {
        let source = SourceFile::from_bytes("tone.wav", WAV_MIME_TYPE, mono_8bit_wav(400));
        let descriptor = source.parse(&ParseOptions::default()).unwrap();
        assert_eq!(descriptor.data.len(), 400);
        assert!((descriptor.milliseconds - 50.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_read_source_populates_metadata() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tone.wav");
        fs::write(&path, mono_8bit_wav(8000)).unwrap();

        let source = read_source(&path).await.unwrap();
        assert_eq!(source.name, "tone.wav");
        assert_eq!(source.size, 8044);
        assert_eq!(source.mime_type, "audio/wav");
        assert!(source.last_modified.is_some());

        let descriptor = source.parse(&ParseOptions::default()).unwrap();
        assert!((descriptor.milliseconds - 1000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_read_source_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_source(tmp.path().join("missing.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[tokio::test]
    async fn test_inspect_file_notifies_once_with_descriptor() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tone.wav");
        fs::write(&path, mono_8bit_wav(16)).unwrap();

        let mut calls = 0;
        let len = inspect_file(&path, &ParseOptions::default(), |source, outcome| {
            calls += 1;
            assert_eq!(source.name, "tone.wav");
            outcome.map(|d| d.data.len()).ok()
        })
        .await;

        assert_eq!(calls, 1);
        assert_eq!(len, Some(16));
    }

    #[tokio::test]
    async fn test_inspect_file_wrong_extension_is_invalid_input() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tone.bin");
        fs::write(&path, mono_8bit_wav(16)).unwrap();

        let kind = inspect_file(&path, &ParseOptions::default(), |_, outcome| {
            outcome.err().and_then(|e| e.as_wav_error().map(|w| w.kind))
        })
        .await;
        assert_eq!(kind, Some(WavErrorKind::InvalidInput));
    }

    #[tokio::test]
    async fn test_inspect_file_read_failure_skips_parser() {
        let tmp = TempDir::new().unwrap();
        let is_read_error = inspect_file(
            tmp.path().join("missing.wav"),
            &ParseOptions::default(),
            |source, outcome| {
                assert!(source.bytes.is_empty());
                matches!(outcome, Err(LoadError::Read { .. }))
            },
        )
        .await;
        assert!(is_read_error);
    }
}
