//! PCM/WAV codec.
//!
//! Speech providers hand back headerless 16-bit little-endian PCM. This module
//! wraps it in a canonical 44-byte RIFF/WAVE header for export and converts it
//! to normalized `f32` samples for playback.

use serde::{Deserialize, Serialize};

/// Size of the canonical PCM WAVE header.
pub const WAV_HEADER_LEN: usize = 44;

/// Sample rate the speech provider renders at.
pub const PROVIDER_SAMPLE_RATE: u32 = 24000;

/// Media type attached to exported files.
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Format parameters written into the `fmt ` sub-chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavSpec {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            sample_rate: PROVIDER_SAMPLE_RATE,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

impl WavSpec {
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Wraps on overflow; fields are written as given.
    pub fn block_align(&self) -> u16 {
        self.channels.wrapping_mul(self.bits_per_sample / 8)
    }

    /// Wraps on overflow; fields are written as given.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate
            .wrapping_mul(self.channels as u32)
            .wrapping_mul(self.bits_per_sample as u32 / 8)
    }
}

/// A complete WAV container ready to be written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WavFile {
    bytes: Vec<u8>,
}

impl WavFile {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }

    /// The PCM payload following the header.
    pub fn pcm(&self) -> &[u8] {
        &self.bytes[WAV_HEADER_LEN..]
    }
}

/// Build the 44-byte header declaring `data_len` bytes of PCM.
///
/// Inputs are trusted; nothing is validated. Size fields wrap modulo 2^32.
pub fn build_wav_header(data_len: u32, spec: WavSpec) -> [u8; WAV_HEADER_LEN] {
    let mut header = [0u8; WAV_HEADER_LEN];

    // RIFF header
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&36u32.wrapping_add(data_len).to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes()); // chunk size
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM format
    header[22..24].copy_from_slice(&spec.channels.to_le_bytes());
    header[24..28].copy_from_slice(&spec.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&spec.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&spec.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&spec.bits_per_sample.to_le_bytes());

    // data chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());

    header
}

/// Prefix mono 16-bit `pcm` with a WAV header.
///
/// RIFF sizes are 32-bit: for payloads of 4 GiB or more the declared length
/// wraps, while the payload itself is still copied in full.
pub fn build_wav_file(pcm: &[u8], sample_rate: u32) -> WavFile {
    let data_len = u32::try_from(pcm.len()).unwrap_or_else(|_| {
        log::warn!(
            "PCM payload of {} bytes exceeds the RIFF size limit; header length wraps",
            pcm.len()
        );
        pcm.len() as u32
    });
    let header = build_wav_header(data_len, WavSpec::mono(sample_rate));

    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(pcm);

    WavFile { bytes }
}

/// Reinterpret `pcm` as little-endian i16 samples scaled into [-1.0, 1.0).
///
/// A trailing odd byte cannot form a sample and is dropped.
pub fn pcm16_to_float_samples(pcm: &[u8]) -> Vec<f32> {
    let chunks = pcm.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        log::warn!(
            "PCM buffer has odd length {}; dropping trailing byte",
            pcm.len()
        );
    }

    chunks
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect()
}

/// Playback length of mono 16-bit `pcm` in milliseconds.
pub fn pcm16_duration_ms(pcm: &[u8], sample_rate: u32) -> u64 {
    if sample_rate == 0 {
        return 0;
    }
    (pcm.len() as u64 / 2) * 1000 / sample_rate as u64
}
