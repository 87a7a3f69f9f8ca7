//! Studio configuration loaded from TOML
//!
//! ```toml
//! voice = "Kore"
//! output_dir = "narration"
//! download_delay_ms = 100
//!
//! [provider]
//! model = "gemini-2.5-flash-preview-tts"
//!
//! [[scene]]
//! id = "intro"
//! text = "Welcome to the product tour."
//! ```

use crate::error::{StudioError, StudioResult};
use crate::scene::SceneSeed;
use scenevox_speech::VoiceOption;
use scenevox_speech::providers::gemini::GeminiConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Initially selected voice
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Directory WAV files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Pause before each file in a bulk download
    #[serde(default = "default_download_delay_ms")]
    pub download_delay_ms: u64,

    #[serde(default)]
    pub provider: GeminiConfig,

    #[serde(default, rename = "scene")]
    pub scenes: Vec<SceneSeed>,
}

fn default_voice() -> String {
    VoiceOption::default().name.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_download_delay_ms() -> u64 {
    100
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            output_dir: default_output_dir(),
            download_delay_ms: default_download_delay_ms(),
            provider: GeminiConfig::default(),
            scenes: SceneSeed::defaults(),
        }
    }
}

impl StudioConfig {
    pub fn from_file(path: impl AsRef<Path>) -> StudioResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StudioError::io(path, e))?;
        log::debug!("Loading studio config from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> StudioResult<Self> {
        let mut config: StudioConfig = toml::from_str(content)
            .map_err(|e| StudioError::Config(format!("Failed to parse TOML: {e}")))?;
        if config.scenes.is_empty() {
            config.scenes = SceneSeed::defaults();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StudioResult<()> {
        self.selected_voice()?;

        let mut seen = HashSet::new();
        for scene in &self.scenes {
            if !seen.insert(scene.id.as_str()) {
                return Err(StudioError::DuplicateScene(scene.id.clone()));
            }
        }
        Ok(())
    }

    pub fn selected_voice(&self) -> StudioResult<VoiceOption> {
        Ok(self.voice.parse::<VoiceOption>()?)
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = StudioConfig::from_toml_str("").unwrap();
        assert_eq!(config.voice, "Sadachbia");
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.download_delay(), Duration::from_millis(100));
        assert_eq!(config.provider.model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.scenes, SceneSeed::defaults());
    }

    #[test]
    fn test_full_config() {
        let config = StudioConfig::from_toml_str(
            r#"
            voice = "kore"
            output_dir = "out"
            download_delay_ms = 0

            [provider]
            model = "gemini-2.5-pro-preview-tts"
            base_url = "http://localhost:8080"
            timeout_secs = 30

            [[scene]]
            id = "intro"
            text = "Hello"

            [[scene]]
            id = "outro"
            text = "Bye"
            "#,
        )
        .unwrap();

        assert_eq!(config.selected_voice().unwrap().name, "Kore");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.download_delay(), Duration::ZERO);
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.provider.timeout_secs, Some(30));
        assert!(config.provider.api_key.is_none());
        assert_eq!(
            config.scenes,
            vec![SceneSeed::new("intro", "Hello"), SceneSeed::new("outro", "Bye")]
        );
    }

    #[test]
    fn test_unknown_voice_rejected() {
        let err = StudioConfig::from_toml_str(r#"voice = "Nobody""#).unwrap_err();
        assert!(matches!(err, StudioError::Speech(_)));
        assert!(err.to_string().contains("Nobody"));
    }

    #[test]
    fn test_duplicate_scene_rejected() {
        let err = StudioConfig::from_toml_str(
            r#"
            [[scene]]
            id = "a"
            text = "one"

            [[scene]]
            id = "a"
            text = "two"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, StudioError::DuplicateScene(id) if id == "a"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = StudioConfig::from_toml_str("voice = [").unwrap_err();
        assert!(matches!(err, StudioError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "voice = \"Puck\"\ndownload_delay_ms = 5").unwrap();

        let config = StudioConfig::from_file(file.path()).unwrap();
        assert_eq!(config.voice, "Puck");
        assert_eq!(config.download_delay_ms, 5);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StudioConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, StudioError::Io { .. }));
    }
}
