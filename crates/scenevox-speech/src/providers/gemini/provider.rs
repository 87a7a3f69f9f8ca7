//! Gemini provider implementation

use super::config::{ENV_API_KEY, GeminiConfig};
use super::error::{GeminiError, PROVIDER_NAME, Result};
use super::wire::{GenerateContentRequest, GenerateContentResponse};
use crate::types::PcmAudio;
use crate::{
    ModelInfo, SpeechRequest, SpeechResponse, SpeechResult, TTSModelsProvider, TTSProvider,
    TTSSpeechProvider,
};
use async_trait::async_trait;
use std::time::Duration;

/// Gemini text-to-speech client
///
/// One `generateContent` call per utterance. The API key is checked before any
/// request is made, so a missing credential never reaches the network.
pub struct GeminiTTS {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiTTS {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Provider configured from the environment with default settings
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env())
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Fetch raw PCM for `text` spoken by `voice_name`
    pub async fn synthesize(&self, text: &str, voice_name: &str) -> Result<Vec<u8>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GeminiError::MissingApiKey(ENV_API_KEY.to_string()))?;

        let response = self
            .client
            .post(self.config.endpoint())
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::speech(text, voice_name))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(GeminiError::ApiError { status, body });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GeminiError::MalformedResponse(e.to_string()))?;

        parsed.into_pcm()
    }
}

impl TTSProvider for GeminiTTS {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }
}

#[async_trait]
impl TTSSpeechProvider for GeminiTTS {
    async fn generate_speech(&self, request: SpeechRequest) -> SpeechResult<SpeechResponse> {
        let pcm = self
            .synthesize(&request.text, request.voice.name())
            .await
            .inspect_err(|e| log::error!("Gemini TTS error: {e}"))?;

        log::info!(
            "Synthesized {} bytes of PCM with voice {}",
            pcm.len(),
            request.voice.name()
        );
        Ok(SpeechResponse::from_pcm(request.text, PcmAudio::new(pcm)))
    }
}

#[async_trait]
impl TTSModelsProvider for GeminiTTS {
    fn get_current_model(&self) -> ModelInfo {
        ModelInfo {
            id: self.config.model.clone(),
            name: self.config.model.clone(),
            description: Some("Gemini prebuilt-voice speech generation (24kHz mono PCM)".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpeechError;

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        // Unroutable base URL: reaching the network would surface a provider error.
        let config = GeminiConfig::default().with_base_url("http://192.0.2.1:9");
        let provider = GeminiTTS::new(config).unwrap();
        assert!(!provider.has_api_key());

        let err = provider
            .generate_speech(SpeechRequest::new("Hello", "Kore"))
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::ConfigurationError(..)));
    }

    #[test]
    fn test_current_model() {
        let provider = GeminiTTS::new(GeminiConfig::default()).unwrap();
        let model = provider.get_current_model();
        assert_eq!(model.id, "gemini-2.5-flash-preview-tts");
        assert_eq!(provider.provider_name(), "gemini");
        assert_eq!(provider.default_sample_rate(), 24000);
    }
}
