//! # SceneVox Speech
//!
//! The audio pipeline behind SceneVox: turning text into raw PCM through a
//! speech provider, wrapping that PCM for export, and playing it back.
//!
//! ## Features
//!
//! - **Codec**: canonical 44-byte WAV headers and PCM→`f32` conversion
//! - **Speech Generation**: whole-utterance synthesis through provider traits
//! - **Voice Catalog**: the prebuilt voices, grouped by gender
//! - **Playback**: a single-slot controller that never plays two clips at once
//!
//! ## Architecture
//!
//! - `TTSProvider`: Marker trait combining all TTS capabilities
//! - `TTSSpeechProvider`: Speech generation capabilities
//! - `TTSModelsProvider`: Model information
//! - `playback::AudioOutput`: Device boundary used by `PlaybackController`
//!
//! ## Providers
//!
//! Enable providers using feature flags:
//! - `gemini` (default): Gemini prebuilt-voice TTS over HTTP
//! - `playback`: default audio device output via rodio
//!
//! ## Example
//!
//! ```rust
//! use scenevox_speech::{SpeechRequest, TTSProvider, TTSSpeechProvider};
//! use scenevox_speech::codec::build_wav_file;
//!
//! async fn narrate(provider: &dyn TTSProvider, text: &str) -> Vec<u8> {
//!     let response = provider
//!         .generate_speech(SpeechRequest::new(text, "Kore"))
//!         .await
//!         .unwrap();
//!     build_wav_file(&response.audio.bytes, response.audio.sample_rate).into_bytes()
//! }
//! ```

pub mod codec;
pub mod error;
pub mod playback;
mod provider;
pub mod types;
pub mod voices;

// Provider implementations
pub mod providers;

pub use codec::{WavFile, WavSpec};
pub use error::{PlaybackError, SpeechError, SpeechResult};
pub use provider::{TTSModelsProvider, TTSProvider, TTSSpeechProvider};
pub use types::{AudioData, ModelInfo, PcmAudio, SpeechRequest, SpeechResponse, VoiceIdentifier};
pub use voices::{Gender, PREVIEW_TEXT, VoiceOption};
