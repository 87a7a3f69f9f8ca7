//! Error types for the Gemini provider

use thiserror::Error;

pub(crate) const PROVIDER_NAME: &str = "gemini";

/// Gemini specific errors
#[derive(Error, Debug)]
pub enum GeminiError {
    /// No API key in the environment or configuration
    #[error("API key not found in environment variables\nVariables checked: {0}")]
    MissingApiKey(String),

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("Gemini API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// First candidate carried no inline audio part
    #[error("No audio data returned from Gemini API")]
    NoAudio,

    /// Inline audio was not valid base64
    #[error("Audio payload is not valid base64: {0}")]
    InvalidAudioEncoding(#[from] base64::DecodeError),
}

/// Result type for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

// Conversion to parent crate's SpeechError
impl From<GeminiError> for crate::SpeechError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey(vars) => crate::SpeechError::ConfigurationError(
                "API key not found in environment variables".to_string(),
                vars,
            ),
            other => crate::SpeechError::ProviderError(other.to_string(), PROVIDER_NAME.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpeechError;

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err: SpeechError = GeminiError::MissingApiKey("API_KEY".into()).into();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("export API_KEY"));
    }

    #[test]
    fn test_no_audio_is_provider_error() {
        let err: SpeechError = GeminiError::NoAudio.into();
        match err {
            SpeechError::ProviderError(msg, provider) => {
                assert_eq!(msg, "No audio data returned from Gemini API");
                assert_eq!(provider, "gemini");
            }
            other => panic!("Unexpected conversion: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_keeps_status() {
        let err: SpeechError = GeminiError::ApiError {
            status: 429,
            body: "quota".into(),
        }
        .into();
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("quota"));
    }
}
