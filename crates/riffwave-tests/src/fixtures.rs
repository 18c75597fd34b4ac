//! Synthetic WAV buffers for tests.
//!
//! [`WavFixture`] produces a byte-exact canonical header from a handful of parameters and
//! lets tests override any field afterwards, including to inconsistent values.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Byte offsets of the fixed header fields.
pub mod offsets {
    pub const CHUNK_ID: usize = 0;
    pub const CHUNK_SIZE: usize = 4;
    pub const FORMAT: usize = 8;
    pub const SUBCHUNK1_ID: usize = 12;
    pub const SUBCHUNK1_SIZE: usize = 16;
    pub const AUDIO_FORMAT: usize = 20;
    pub const CHANNELS: usize = 22;
    pub const SAMPLE_RATE: usize = 24;
    pub const BYTE_RATE: usize = 28;
    pub const BLOCK_ALIGN: usize = 32;
    pub const BITS_PER_SAMPLE: usize = 34;
    pub const EXTRA_PARAM_SIZE: usize = 36;
}

/// Builder for WAV buffers.
#[derive(Debug, Clone)]
pub struct WavFixture {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// `Some(n)` writes an 18-byte fmt chunk with `extra_param_size = n`.
    pub extra_param_size: Option<u16>,
    pub data: Vec<u8>,
    pub byte_rate: Option<u32>,
    pub block_align: Option<u16>,
}

impl Default for WavFixture {
    fn default() -> Self {
        Self {
            audio_format: 1,
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 8,
            extra_param_size: None,
            data: Vec::new(),
            byte_rate: None,
            block_align: None,
        }
    }
}

impl WavFixture {
    /// PCM with the given format and `frames` zeroed sample frames.
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16, frames: usize) -> Self {
        let frame_len = usize::from(channels) * usize::from(bits_per_sample / 8);
        Self {
            channels,
            sample_rate,
            bits_per_sample,
            data: vec![0; frames * frame_len],
            ..Default::default()
        }
    }

    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    pub fn extended(mut self, extra_param_size: u16) -> Self {
        self.extra_param_size = Some(extra_param_size);
        self
    }

    /// Overrides the byte rate instead of deriving it.
    pub fn byte_rate(mut self, byte_rate: u32) -> Self {
        self.byte_rate = Some(byte_rate);
        self
    }

    /// Overrides the block align instead of deriving it.
    pub fn block_align(mut self, block_align: u16) -> Self {
        self.block_align = Some(block_align);
        self
    }

    pub fn derived_block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    pub fn derived_byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.derived_block_align())
    }

    pub fn subchunk1_size(&self) -> u32 {
        if self.extra_param_size.is_some() {
            18
        } else {
            16
        }
    }

    /// Offset of the data chunk tag.
    pub fn data_tag_offset(&self) -> usize {
        20 + self.subchunk1_size() as usize
    }

    /// Serializes the fixture.
    pub fn build(&self) -> Vec<u8> {
        let subchunk1_size = self.subchunk1_size();
        let header_len = 28 + subchunk1_size as usize;
        let chunk_size = (header_len - 8 + self.data.len()) as u32;

        let mut wav = Vec::with_capacity(header_len + self.data.len());
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&chunk_size.to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&subchunk1_size.to_le_bytes());
        wav.extend_from_slice(&self.audio_format.to_le_bytes());
        wav.extend_from_slice(&self.channels.to_le_bytes());
        wav.extend_from_slice(&self.sample_rate.to_le_bytes());
        wav.extend_from_slice(
            &self
                .byte_rate
                .unwrap_or_else(|| self.derived_byte_rate())
                .to_le_bytes(),
        );
        wav.extend_from_slice(
            &self
                .block_align
                .unwrap_or_else(|| self.derived_block_align())
                .to_le_bytes(),
        );
        wav.extend_from_slice(&self.bits_per_sample.to_le_bytes());
        if let Some(extra) = self.extra_param_size {
            wav.extend_from_slice(&extra.to_le_bytes());
        }

        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        wav.extend_from_slice(&self.data);
        wav
    }
}

/// Writes little-endian `value` at `offset`.
pub fn patch_u16(wav: &mut [u8], offset: usize, value: u16) {
    wav[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

/// Writes little-endian `value` at `offset`.
pub fn patch_u32(wav: &mut [u8], offset: usize, value: u32) {
    wav[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// A temporary directory of WAV files.
pub struct WavDirFixture {
    pub root: TempDir,
}

impl WavDirFixture {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Writes `bytes` to `relative`, creating parent directories.
    pub fn add(&self, relative: &str, bytes: &[u8]) -> PathBuf {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        fs::write(&path, bytes).expect("Failed to write fixture file");
        path
    }
}

impl Default for WavDirFixture {
    fn default() -> Self {
        Self::new()
    }
}
