//! Decoded WAV header fields and the validated descriptor.

use serde::Serialize;

use crate::reader::FourCc;

/// Size of the canonical PCM header (RIFF + 16-byte fmt + data header).
pub const MIN_HEADER_LEN: usize = 44;

/// Opaque bytes following `extra_param_size` in an 18-byte fmt chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtraParams(pub Vec<u8>);

impl ExtraParams {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads the bytes as one little-endian unsigned integer.
    ///
    /// Returns `None` when the field is wider than 16 bytes.
    pub fn as_le_integer(&self) -> Option<u128> {
        if self.0.len() > 16 {
            return None;
        }
        Some(
            self.0
                .iter()
                .rev()
                .fold(0u128, |acc, &byte| (acc << 8) | u128::from(byte)),
        )
    }
}

/// Every scalar field of a WAV header, in file order.
///
/// Fields that have not been reached yet keep their `Default` value, which is how a
/// failed parse reports how far it got.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WavHeader {
    pub chunk_id: FourCc,
    pub chunk_size: u32,
    pub format: FourCc,

    pub subchunk1_id: FourCc,
    pub subchunk1_size: u32,
    /// Audio format code (1 = PCM, 3 = IEEE float).
    pub audio_format: u16,
    pub number_of_channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes of audio per second of playback.
    pub byte_rate: u32,
    /// Bytes per sample frame across all channels.
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub extra_param_size: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_params: Option<ExtraParams>,

    /// Offset of the data chunk tag (`20 + subchunk1_size`).
    pub subchunk2_start_pos: usize,
    pub subchunk2_id: FourCc,
    pub subchunk2_size: u32,
}

impl WavHeader {
    /// Bytes per sample for a single channel.
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// `sample_rate * channels * bytes_per_sample`, widened so it cannot overflow.
    pub fn expected_byte_rate(&self) -> u64 {
        u64::from(self.sample_rate)
            * u64::from(self.number_of_channels)
            * u64::from(self.bytes_per_sample())
    }

    /// `channels * bytes_per_sample`, widened so it cannot overflow.
    pub fn expected_block_align(&self) -> u32 {
        u32::from(self.number_of_channels) * u32::from(self.bytes_per_sample())
    }

    /// Playback duration in milliseconds.
    ///
    /// Returns `0.0` when the channel count, sample rate or sample width is zero, as it is
    /// for a header the parser has not validated.
    pub fn duration_millis(&self) -> f64 {
        if self.number_of_channels == 0 || self.sample_rate == 0 || self.bytes_per_sample() == 0 {
            return 0.0;
        }
        let bytes_per_sample = f64::from(self.bytes_per_sample());
        f64::from(self.subchunk2_size) / bytes_per_sample
            / f64::from(self.sample_rate)
            / f64::from(self.number_of_channels)
            * 1000.0
    }
}

/// A fully validated WAV file.
///
/// `data` borrows the input buffer and spans exactly the data chunk payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WavDescriptor<'a> {
    #[serde(flatten)]
    pub header: WavHeader,
    #[serde(skip)]
    pub data: &'a [u8],
    pub milliseconds: f64,
}

impl WavDescriptor<'_> {
    pub fn channels(&self) -> u16 {
        self.header.number_of_channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.header.bits_per_sample
    }

    /// Number of sample frames in the data chunk.
    pub fn frame_count(&self) -> usize {
        match self.header.block_align {
            0 => 0,
            align => self.data.len() / usize::from(align),
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.milliseconds / 1000.0
    }
}
