//! Scene model.

use crate::error::{StudioError, StudioResult};
use scenevox_speech::{PcmAudio, WavFile};
use serde::{Deserialize, Serialize};

/// Generation status of a scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneStatus {
    /// No audio and nothing in flight
    Idle,
    /// A synthesis request is in flight
    Generating,
    /// Audio is available
    Ready,
}

/// Synthesized audio and the WAV file derived from it
///
/// Kept as one value so a scene can never hold one without the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneAudio {
    pcm: PcmAudio,
    wav: WavFile,
}

impl SceneAudio {
    pub fn from_pcm(pcm: PcmAudio) -> Self {
        let wav = pcm.to_wav();
        Self { pcm, wav }
    }

    pub fn pcm(&self) -> &PcmAudio {
        &self.pcm
    }

    pub fn wav(&self) -> &WavFile {
        &self.wav
    }

    pub fn duration_ms(&self) -> u64 {
        self.pcm.duration_ms()
    }

    /// Payload size in KiB, for display
    pub fn size_kib(&self) -> f64 {
        self.pcm.len() as f64 / 1024.0
    }
}

/// Identifier and text used to create a scene
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSeed {
    pub id: String,
    pub text: String,
}

impl SceneSeed {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Scenes loaded when nothing else is configured
    pub fn defaults() -> Vec<SceneSeed> {
        vec![
            SceneSeed::new(
                "1",
                "Chào mừng các bạn đến với video giới thiệu sản phẩm mới của chúng tôi.",
            ),
            SceneSeed::new(
                "2",
                "Đây là tính năng đột phá giúp bạn tiết kiệm 50% thời gian làm việc.",
            ),
            SceneSeed::new("C3", "Hãy cùng xem demo chi tiết ngay sau đây."),
        ]
    }
}

/// A unit of narration text and its synthesized audio
#[derive(Clone, Debug)]
pub struct Scene {
    id: String,
    text: String,
    audio: Option<SceneAudio>,
    /// Text revision captured by the in-flight request, if any
    in_flight: Option<u64>,
    revision: u64,
    pub(crate) is_playing: bool,
}

impl Scene {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> StudioResult<Self> {
        let id = id.into();
        validate_id(&id)?;
        Ok(Self {
            id,
            text: text.into(),
            audio: None,
            in_flight: None,
            revision: 0,
            is_playing: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn audio(&self) -> Option<&SceneAudio> {
        self.audio.as_ref()
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn status(&self) -> SceneStatus {
        if self.in_flight.is_some() {
            SceneStatus::Generating
        } else if self.audio.is_some() {
            SceneStatus::Ready
        } else {
            SceneStatus::Idle
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Name the scene's WAV file is exported under
    pub fn wav_filename(&self) -> String {
        format!("{}.wav", self.id)
    }

    /// Replace the text; any audio no longer matches it and is dropped.
    pub(crate) fn edit_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.audio = None;
        self.revision += 1;
    }

    /// Move to `Generating`, returning the text revision being synthesized.
    pub(crate) fn begin_generation(&mut self) -> StudioResult<u64> {
        if self.in_flight.is_some() {
            return Err(StudioError::SceneBusy(self.id.clone()));
        }
        self.in_flight = Some(self.revision);
        Ok(self.revision)
    }

    /// Leave `Generating`. Audio is stored only if the text is unchanged since
    /// `revision`; returns whether it was.
    pub(crate) fn finish_generation(&mut self, revision: u64, audio: Option<PcmAudio>) -> bool {
        self.in_flight = None;
        if revision != self.revision {
            return false;
        }
        if let Some(pcm) = audio {
            self.audio = Some(SceneAudio::from_pcm(pcm));
        }
        true
    }
}

fn validate_id(id: &str) -> StudioResult<()> {
    let invalid = |reason: &str| Err(StudioError::InvalidScene(id.to_string(), reason.to_string()));

    if id.trim().is_empty() {
        return invalid("id cannot be empty");
    }
    if id.contains(['/', '\\']) || id == "." || id == ".." {
        return invalid("id is used as a file name and cannot contain path separators");
    }
    Ok(())
}
