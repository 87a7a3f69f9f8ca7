use crate::codec::{self, PROVIDER_SAMPLE_RATE, WavFile};
use serde::{Deserialize, Serialize};

/// Model information
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier
    pub id: String,
    /// Model name
    pub name: String,
    /// Model description
    pub description: Option<String>,
}

/// Raw 16-bit little-endian mono PCM as returned by a provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcmAudio {
    pub bytes: Vec<u8>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl PcmAudio {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            sample_rate: PROVIDER_SAMPLE_RATE,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        codec::pcm16_duration_ms(&self.bytes, self.sample_rate)
    }

    /// Wrap the payload in a WAV container
    pub fn to_wav(&self) -> WavFile {
        codec::build_wav_file(&self.bytes, self.sample_rate)
    }
}

/// Audio data with normalized samples
#[derive(Clone, Debug)]
pub struct AudioData {
    /// Audio samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Number of audio channels (always 1 for provider output)
    pub channels: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioData {
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0;
        }
        let frames = self.samples.len() as u64 / self.channels as u64;
        frames * 1000 / self.sample_rate as u64
    }
}

/// Voice identifier for synthesis (provider-defined name)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VoiceIdentifier {
    pub name: String,
}

impl VoiceIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<String> for VoiceIdentifier {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for VoiceIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Speech synthesis request
#[derive(Clone, Debug)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: VoiceIdentifier,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, voice: impl Into<VoiceIdentifier>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
        }
    }
}

/// Speech synthesis response
#[derive(Clone, Debug)]
pub struct SpeechResponse {
    pub audio: PcmAudio,
    pub text: String,
    pub duration_ms: u64,
}

impl SpeechResponse {
    pub fn from_pcm(text: impl Into<String>, audio: PcmAudio) -> Self {
        let duration_ms = audio.duration_ms();
        Self {
            audio,
            text: text.into(),
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_duration() {
        let response = SpeechResponse::from_pcm("hi", PcmAudio::new(vec![0; 4800]));
        assert_eq!(response.duration_ms, 100);
        assert_eq!(response.audio.to_wav().len(), 4844);
    }

    #[test]
    fn test_voice_identifier_from_string() {
        let voice: VoiceIdentifier = "Kore".into();
        assert_eq!(voice.name(), "Kore");
    }
}
