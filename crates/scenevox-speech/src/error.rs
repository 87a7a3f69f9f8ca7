use thiserror::Error;

/// Speech synthesis errors
#[derive(Error, Debug)]
pub enum SpeechError {
    /// No provider credential configured
    #[error(
        "Speech provider is not configured: {0}\nSuggestion: export {1} before requesting synthesis"
    )]
    ConfigurationError(String, String),

    /// Network failure or unusable provider response
    #[error("Speech provider error: {0}\nProvider: {1}")]
    ProviderError(String, String),

    /// Voice not found in the catalog
    #[error("Voice not found: '{0}'\nAvailable voices: {1}")]
    VoiceNotFound(String, String),

    /// Playback of synthesized audio failed
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

impl SpeechError {
    /// Create a provider error tagged with the provider name
    pub fn provider(msg: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::ProviderError(msg.into(), provider.into())
    }

    /// Missing credential is the only error that blocks synthesis outright.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationError(..))
    }
}

/// Result type for speech operations
pub type SpeechResult<T> = Result<T, SpeechError>;

/// Audio output errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("Failed to initialize audio output: {0}")]
    OutputUnavailable(String),
    #[error("Failed to start playback session: {0}")]
    SessionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_mentions_variable() {
        let err = SpeechError::ConfigurationError("API key not found".into(), "API_KEY".into());
        let msg = err.to_string();
        assert!(msg.contains("API key not found"));
        assert!(msg.contains("export API_KEY"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_playback_error_is_transparent() {
        let err: SpeechError = PlaybackError::OutputUnavailable("no device".into()).into();
        assert_eq!(err.to_string(), "Failed to initialize audio output: no device");
        assert!(!err.is_configuration());
    }
}
