//! Sequential RIFF/WAVE header validation.
//!
//! Fields are read at the fixed offsets of the canonical PCM layout and checked in file
//! order. The first failing check ends the parse; nothing after it is read.
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 4 | `chunk_id` ("RIFF") |
//! | 4 | 4 | `chunk_size` (buffer length - 8) |
//! | 8 | 4 | `format` ("WAVE") |
//! | 12 | 4 | `subchunk1_id` ("fmt ") |
//! | 16 | 4 | `subchunk1_size` (16 or 18) |
//! | 20 | 16 | fmt fields |
//! | 36 | 2 | `extra_param_size` (only when `subchunk1_size` is 18) |
//! | 20 + `subchunk1_size` | 8 | `subchunk2_id` ("data") and `subchunk2_size` |

mod options;


pub use options::{DataBounds, ParseOptions, WAV_MIME_TYPE};

use tracing::{debug, trace};

use crate::error::{WavError, WavErrorKind, WavField, WavResult};
use crate::header::{ExtraParams, WavDescriptor, WavHeader, MIN_HEADER_LEN};
use crate::reader::{ByteReader, FourCc, OutOfBounds};

/// Offset of the first fmt field; the data chunk starts this far plus `subchunk1_size`.
const FMT_BODY_OFFSET: usize = 20;
/// Size of the tag and length that precede every chunk payload.
const CHUNK_HEADER_LEN: usize = 8;

/// Parses a WAV buffer with default options.
///
/// `declared_type` and `declared_length` describe the file the buffer was read from and
/// are checked before any byte is read.
///
/// # Example
///
/// ```rust,no_run
/// let bytes = std::fs::read("tone.wav").unwrap();
/// let wav = riffwave::parse(&bytes, "audio/wav", bytes.len()).unwrap();
/// println!("{} Hz, {:.1} ms", wav.sample_rate(), wav.milliseconds);
/// ```
pub fn parse<'a>(
    buffer: &'a [u8],
    declared_type: &str,
    declared_length: usize,
) -> WavResult<WavDescriptor<'a>> {
    parse_with(buffer, declared_type, declared_length, &ParseOptions::default())
}

/// Parses a WAV buffer with explicit options.
pub fn parse_with<'a>(
    buffer: &'a [u8],
    declared_type: &str,
    declared_length: usize,
    options: &ParseOptions,
) -> WavResult<WavDescriptor<'a>> {
    let mut parser = Parser {
        reader: ByteReader::new(buffer),
        header: WavHeader::default(),
        options,
    };
    parser.check_input(declared_type, declared_length)?;
    parser.parse_riff_header()?;
    parser.parse_fmt_chunk()?;
    parser.parse_data_header()?;

    let data = parser.data_slice(buffer);
    let milliseconds = parser.header.duration_millis();
    Ok(WavDescriptor {
        header: parser.header,
        data,
        milliseconds,
    })
}

struct Parser<'a, 'o> {
    reader: ByteReader<'a>,
    header: WavHeader,
    options: &'o ParseOptions,
}

impl<'a, 'o> Parser<'a, 'o> {
    fn fail(&self, kind: WavErrorKind, field: WavField, message: impl Into<String>) -> WavError {
        let err = WavError::new(kind, field, message, &self.header);
        debug!(code = err.code(), field = %field, "{}", err.message);
        err
    }

    fn truncated(&self, field: WavField, err: OutOfBounds) -> WavError {
        self.fail(
            WavErrorKind::MalformedHeader,
            field,
            format!("truncated {}: {}", field, err),
        )
    }

    fn tag(&self, field: WavField, offset: usize) -> WavResult<FourCc> {
        self.reader
            .tag(offset)
            .map_err(|err| self.truncated(field, err))
    }

    fn u16(&self, field: WavField, offset: usize) -> WavResult<u16> {
        self.reader
            .u16_le(offset)
            .map_err(|err| self.truncated(field, err))
    }

    fn u32(&self, field: WavField, offset: usize) -> WavResult<u32> {
        self.reader
            .u32_le(offset)
            .map_err(|err| self.truncated(field, err))
    }

    fn expect_tag(&self, field: WavField, found: FourCc, expected: FourCc) -> WavResult<()> {
        if found == expected {
            Ok(())
        } else {
            Err(self.fail(
                WavErrorKind::MalformedHeader,
                field,
                format!("expected '{}', got '{}'", expected, found),
            ))
        }
    }

    fn check_input(&self, declared_type: &str, declared_length: usize) -> WavResult<()> {
        if self.reader.is_empty() {
            return Err(self.fail(WavErrorKind::InvalidInput, WavField::Buffer, "empty buffer"));
        }

        if declared_type != self.options.expected_mime {
            return Err(self.fail(
                WavErrorKind::InvalidInput,
                WavField::DeclaredType,
                format!(
                    "unknown file type '{}' (expected '{}')",
                    declared_type, self.options.expected_mime
                ),
            ));
        }

        if declared_length != self.reader.len() {
            return Err(self.fail(
                WavErrorKind::InvalidInput,
                WavField::DeclaredLength,
                format!(
                    "declared length {} does not match buffer length {}",
                    declared_length,
                    self.reader.len()
                ),
            ));
        }

        Ok(())
    }

    fn parse_riff_header(&mut self) -> WavResult<()> {
        if self.reader.len() < MIN_HEADER_LEN {
            return Err(self.fail(
                WavErrorKind::MalformedHeader,
                WavField::Buffer,
                format!(
                    "buffer too short: {} bytes (minimum {} required)",
                    self.reader.len(),
                    MIN_HEADER_LEN
                ),
            ));
        }

        self.header.chunk_id = self.tag(WavField::ChunkId, 0)?;
        self.expect_tag(WavField::ChunkId, self.header.chunk_id, FourCc::RIFF)?;

        self.header.chunk_size = self.u32(WavField::ChunkSize, 4)?;
        if u64::from(self.header.chunk_size) + CHUNK_HEADER_LEN as u64 != self.reader.len() as u64
        {
            return Err(self.fail(
                WavErrorKind::MalformedChunkSize,
                WavField::ChunkSize,
                format!(
                    "incorrect chunk size {} for a {}-byte buffer",
                    self.header.chunk_size,
                    self.reader.len()
                ),
            ));
        }

        self.header.format = self.tag(WavField::Format, 8)?;
        self.expect_tag(WavField::Format, self.header.format, FourCc::WAVE)
    }

    fn parse_fmt_chunk(&mut self) -> WavResult<()> {
        self.header.subchunk1_id = self.tag(WavField::Subchunk1Id, 12)?;
        self.expect_tag(WavField::Subchunk1Id, self.header.subchunk1_id, FourCc::FMT)?;

        self.header.subchunk1_size = self.u32(WavField::Subchunk1Size, 16)?;
        if !matches!(self.header.subchunk1_size, 16 | 18) {
            return Err(self.fail(
                WavErrorKind::UnsupportedFormat,
                WavField::Subchunk1Size,
                format!(
                    "fmt chunk size {} (only 16 and 18 supported)",
                    self.header.subchunk1_size
                ),
            ));
        }

        self.header.audio_format = self.u16(WavField::AudioFormat, 20)?;
        self.header.number_of_channels = self.u16(WavField::NumberOfChannels, 22)?;
        self.header.sample_rate = self.u32(WavField::SampleRate, 24)?;
        self.header.byte_rate = self.u32(WavField::ByteRate, 28)?;
        self.header.block_align = self.u16(WavField::BlockAlign, 32)?;
        self.header.bits_per_sample = self.u16(WavField::BitsPerSample, 34)?;
        trace!(
            audio_format = self.header.audio_format,
            channels = self.header.number_of_channels,
            sample_rate = self.header.sample_rate,
            bits_per_sample = self.header.bits_per_sample,
            "read fmt fields"
        );

        self.check_fmt_consistency()?;

        if self.header.subchunk1_size > 16 {
            self.header.extra_param_size = self.u16(WavField::ExtraParamSize, 36)?;
            if self.header.extra_param_size > 0 {
                let bytes = self
                    .reader
                    .bytes(38, usize::from(self.header.extra_param_size))
                    .map_err(|err| self.truncated(WavField::ExtraParams, err))?;
                self.header.extra_params = Some(ExtraParams(bytes.to_vec()));
            }
        }

        Ok(())
    }

    fn check_fmt_consistency(&self) -> WavResult<()> {
        let header = &self.header;

        if header.number_of_channels == 0 {
            return Err(self.fail(
                WavErrorKind::InconsistentFmt,
                WavField::NumberOfChannels,
                "channel count is zero",
            ));
        }

        if header.sample_rate == 0 {
            return Err(self.fail(
                WavErrorKind::InconsistentFmt,
                WavField::SampleRate,
                "sample rate is zero",
            ));
        }

        if header.bits_per_sample == 0 || header.bits_per_sample % 8 != 0 {
            return Err(self.fail(
                WavErrorKind::UnsupportedFormat,
                WavField::BitsPerSample,
                format!(
                    "{} bits per sample (must be a positive multiple of 8)",
                    header.bits_per_sample
                ),
            ));
        }

        let expected_byte_rate = header.expected_byte_rate();
        if u64::from(header.byte_rate) != expected_byte_rate {
            return Err(self.fail(
                WavErrorKind::InconsistentFmt,
                WavField::ByteRate,
                format!(
                    "incorrect byte rate {} (expected {})",
                    header.byte_rate, expected_byte_rate
                ),
            ));
        }

        let expected_block_align = header.expected_block_align();
        if u32::from(header.block_align) != expected_block_align {
            return Err(self.fail(
                WavErrorKind::InconsistentFmt,
                WavField::BlockAlign,
                format!(
                    "incorrect block align {} (expected {})",
                    header.block_align, expected_block_align
                ),
            ));
        }

        Ok(())
    }

    fn parse_data_header(&mut self) -> WavResult<()> {
        // subchunk1_size is 16 or 18 here, so this cannot overflow.
        let start = FMT_BODY_OFFSET + self.header.subchunk1_size as usize;
        self.header.subchunk2_start_pos = start;

        self.header.subchunk2_id = self.tag(WavField::Subchunk2Id, start)?;
        self.expect_tag(WavField::Subchunk2Id, self.header.subchunk2_id, FourCc::DATA)?;

        self.header.subchunk2_size = self.u32(WavField::Subchunk2Size, start + 4)?;
        let expected = u64::from(self.header.chunk_size).checked_sub(start as u64);
        if expected != Some(u64::from(self.header.subchunk2_size)) {
            return Err(self.fail(
                WavErrorKind::MalformedChunkSize,
                WavField::Subchunk2Size,
                format!(
                    "incorrect subchunk 2 size {} (chunk size {} leaves {})",
                    self.header.subchunk2_size,
                    self.header.chunk_size,
                    u64::from(self.header.chunk_size).saturating_sub(start as u64)
                ),
            ));
        }

        Ok(())
    }

    /// Slices the data payload. Only called once every size check has passed.
    fn data_slice(&self, buffer: &'a [u8]) -> &'a [u8] {
        let start = (self.header.subchunk2_start_pos + CHUNK_HEADER_LEN).min(buffer.len());
        let size = self.header.subchunk2_size as usize;
        let end = match self.options.data_bounds {
            DataBounds::Exact => start.saturating_add(size),
            DataBounds::Legacy => size,
        }
        .min(buffer.len());

        if end < start {
            &buffer[start..start]
        } else {
            &buffer[start..end]
        }
    }
}
