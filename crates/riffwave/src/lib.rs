//! riffwave: validating RIFF/WAVE parser
//!
//! This crate reads the canonical PCM WAV layout from an in-memory buffer, checks every
//! header field against the buffer and against each other, and returns a
//! [`WavDescriptor`] whose `data` borrows the audio payload without copying it.
//!
//! # Overview
//!
//! Parsing is a pure function of its input. Fields are validated in file order and the
//! first failure is returned as a [`WavError`] naming the field, the failure kind and the
//! header decoded up to that point:
//!
//! - [`WavErrorKind::InvalidInput`] - empty buffer, wrong declared MIME type or length
//! - [`WavErrorKind::MalformedHeader`] - tag mismatch or truncated field
//! - [`WavErrorKind::MalformedChunkSize`] - RIFF or data chunk size disagrees with the buffer
//! - [`WavErrorKind::UnsupportedFormat`] - fmt chunk size or sample width not handled
//! - [`WavErrorKind::InconsistentFmt`] - byte rate or block align contradicts the fmt fields
//!
//! # Example
//!
//! ```
//! use riffwave::{parse, WavErrorKind, WAV_MIME_TYPE};
//!
//! let mut wav = Vec::new();
//! wav.extend_from_slice(b"RIFF");
//! wav.extend_from_slice(&40u32.to_le_bytes());
//! wav.extend_from_slice(b"WAVEfmt ");
//! wav.extend_from_slice(&16u32.to_le_bytes());
//! wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
//! wav.extend_from_slice(&1u16.to_le_bytes()); // mono
//! wav.extend_from_slice(&8000u32.to_le_bytes());
//! wav.extend_from_slice(&8000u32.to_le_bytes());
//! wav.extend_from_slice(&1u16.to_le_bytes());
//! wav.extend_from_slice(&8u16.to_le_bytes());
//! wav.extend_from_slice(b"data");
//! wav.extend_from_slice(&4u32.to_le_bytes());
//! wav.extend_from_slice(&[0x80; 4]);
//!
//! let descriptor = parse(&wav, WAV_MIME_TYPE, wav.len()).unwrap();
//! assert_eq!(descriptor.data, &[0x80; 4]);
//! assert_eq!(descriptor.milliseconds, 0.5);
//!
//! wav[28..32].copy_from_slice(&9000u32.to_le_bytes());
//! let err = parse(&wav, WAV_MIME_TYPE, wav.len()).unwrap_err();
//! assert_eq!(err.kind, WavErrorKind::InconsistentFmt);
//! ```
//!
//! # Modules
//!
//! - [`parser`]: sequential validation and [`ParseOptions`]
//! - [`header`]: decoded header fields and the descriptor
//! - [`reader`]: bounds-checked little-endian reads
//! - [`source`]: async file acquisition that feeds the parser
//! - [`error`]: error kinds, field attribution and load errors

pub mod error;
pub mod header;
pub mod parser;
pub mod reader;
pub mod source;

// Re-export commonly used types at the crate root
pub use error::{LoadError, WavError, WavErrorKind, WavField, WavResult};
pub use header::{ExtraParams, WavDescriptor, WavHeader, MIN_HEADER_LEN};
pub use parser::{parse, parse_with, DataBounds, ParseOptions, WAV_MIME_TYPE};
pub use reader::FourCc;
pub use source::{inspect_file, mime_type_for_path, read_source, SourceFile, WAV_EXTENSIONS};
