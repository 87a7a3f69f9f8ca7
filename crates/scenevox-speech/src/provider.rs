use crate::{ModelInfo, SpeechRequest, SpeechResponse, SpeechResult};
use async_trait::async_trait;

/// Marker Trait for TTS providers
///
/// This trait combines all TTS capabilities into a single provider interface.
/// Providers should implement this marker trait along with the specific capability traits.
pub trait TTSProvider: TTSSpeechProvider + TTSModelsProvider + Send + Sync {
    /// Provider name used in logs and error messages
    fn provider_name(&self) -> &str;
}

/// Trait for TTS speech generation capabilities
#[async_trait]
pub trait TTSSpeechProvider: Send + Sync {
    /// Synthesize the whole utterance (required)
    ///
    /// A single request/response round trip: no retries, no streaming. The
    /// returned audio is raw 16-bit mono PCM.
    async fn generate_speech(&self, request: SpeechRequest) -> SpeechResult<SpeechResponse>;

    /// Get default sample rate
    fn default_sample_rate(&self) -> u32 {
        crate::codec::PROVIDER_SAMPLE_RATE
    }
}

/// Trait for TTS model management capabilities
#[async_trait]
pub trait TTSModelsProvider: Send + Sync {
    /// Get current model information (required)
    fn get_current_model(&self) -> ModelInfo;
}
