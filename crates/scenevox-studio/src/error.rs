use scenevox_speech::{PlaybackError, SpeechError};
use std::path::PathBuf;
use thiserror::Error;

/// Studio errors
#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Scene not found: '{0}'")]
    SceneNotFound(String),

    #[error("Scene '{0}' already exists")]
    DuplicateScene(String),

    #[error("Invalid scene id '{0}': {1}")]
    InvalidScene(String, String),

    /// A synthesis request for the scene is already in flight
    #[error("Scene '{0}' is already generating\nSuggestion: wait for the current request to finish")]
    SceneBusy(String),

    /// Operation needs synthesized audio the scene does not have
    #[error("Scene '{0}' has no audio yet\nSuggestion: generate the scene first")]
    SceneNotReady(String),

    /// Text changed while audio was being generated; the result was dropped
    #[error("Scene '{0}' was edited during generation; the generated audio was discarded")]
    TextChanged(String),

    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("IO error: {source}\nPath: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StudioError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for studio operations
pub type StudioResult<T> = Result<T, StudioError>;
