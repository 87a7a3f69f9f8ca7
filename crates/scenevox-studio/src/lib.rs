//! # SceneVox Studio
//!
//! The scene state manager: an ordered list of narration scenes, each with
//! its own generation status and audio, wired to a speech provider and the
//! shared playback controller.
//!
//! ## Example
//!
//! ```no_run
//! use scenevox_speech::playback::{PlaybackController, SilentOutput};
//! use scenevox_speech::providers::gemini::GeminiTTS;
//! use scenevox_studio::Studio;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(GeminiTTS::from_env()?);
//! let player = Arc::new(PlaybackController::new(Arc::new(SilentOutput::new())));
//! let studio = Studio::new(provider, player);
//!
//! studio.generate("C3").await?;
//! studio.download("C3", std::path::Path::new("out")).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod scene;
mod studio;

pub use config::StudioConfig;
pub use error::{StudioError, StudioResult};
pub use scene::{Scene, SceneAudio, SceneSeed, SceneStatus};
pub use studio::{BatchReport, Studio};
