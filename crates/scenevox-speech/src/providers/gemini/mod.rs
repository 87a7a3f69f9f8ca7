//! Gemini text-to-speech provider
//!
//! # Examples
//!
//! ```no_run
//! use scenevox_speech::providers::gemini::{GeminiConfig, GeminiTTS};
//! use scenevox_speech::{SpeechRequest, TTSSpeechProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads API_KEY (or GEMINI_API_KEY) from the environment
//!     let provider = GeminiTTS::new(GeminiConfig::from_env())?;
//!
//!     let response = provider
//!         .generate_speech(SpeechRequest::new("Hello, world!", "Kore"))
//!         .await?;
//!
//!     std::fs::write("hello.wav", response.audio.to_wav().bytes())?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

mod provider;
mod wire;

// Re-exports
pub use config::GeminiConfig;
pub use error::{GeminiError, Result};
pub use provider::GeminiTTS;
