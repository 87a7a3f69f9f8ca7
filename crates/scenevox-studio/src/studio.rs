use crate::config::StudioConfig;
use crate::error::{StudioError, StudioResult};
use crate::export;
use crate::scene::{Scene, SceneSeed, SceneStatus};
use scenevox_speech::playback::{PlaybackController, PlaybackState, PlaybackTarget};
use scenevox_speech::{Gender, PREVIEW_TEXT, SpeechRequest, TTSProvider, VoiceOption};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Outcome of [`Studio::generate_all`]
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<String>,
    /// Scenes that already had audio or were generating
    pub skipped: Vec<String>,
    pub failed: Vec<(String, StudioError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Scene state manager
///
/// Owns the ordered scene collection and ties it to a speech provider and the
/// shared [`PlaybackController`]. Locks are never held across a synthesis
/// request, so other operations interleave with in-flight generation.
pub struct Studio {
    provider: Arc<dyn TTSProvider>,
    player: Arc<PlaybackController>,
    scenes: Mutex<Vec<Scene>>,
    voice: Mutex<VoiceOption>,
    /// Voice whose preview is being synthesized
    preview: Mutex<Option<VoiceOption>>,
    download_delay: Duration,
}

impl Studio {
    /// Studio seeded with the built-in scenes
    pub fn new(provider: Arc<dyn TTSProvider>, player: Arc<PlaybackController>) -> Self {
        let scenes = SceneSeed::defaults()
            .into_iter()
            .filter_map(|seed| Scene::new(seed.id, seed.text).ok())
            .collect();

        Self {
            provider,
            player,
            scenes: Mutex::new(scenes),
            voice: Mutex::new(VoiceOption::default()),
            preview: Mutex::new(None),
            download_delay: Duration::from_millis(100),
        }
    }

    pub fn from_config(
        config: &StudioConfig,
        provider: Arc<dyn TTSProvider>,
        player: Arc<PlaybackController>,
    ) -> StudioResult<Self> {
        config.validate()?;
        Ok(Self::new(provider, player)
            .with_scenes(config.scenes.clone())?
            .with_voice(config.selected_voice()?)
            .with_download_delay(config.download_delay()))
    }

    /// Replace the scene list
    pub fn with_scenes(mut self, seeds: Vec<SceneSeed>) -> StudioResult<Self> {
        let mut scenes: Vec<Scene> = Vec::with_capacity(seeds.len());
        for seed in seeds {
            if scenes.iter().any(|s| s.id() == seed.id) {
                return Err(StudioError::DuplicateScene(seed.id));
            }
            scenes.push(Scene::new(seed.id, seed.text)?);
        }
        *self.scenes.get_mut() = scenes;
        Ok(self)
    }

    pub fn with_voice(mut self, voice: VoiceOption) -> Self {
        *self.voice.get_mut() = voice;
        self
    }

    /// Pause before each file written by [`Studio::download_all`]
    pub fn with_download_delay(mut self, delay: Duration) -> Self {
        self.download_delay = delay;
        self
    }

    pub fn player(&self) -> &Arc<PlaybackController> {
        &self.player
    }

    /// Snapshot of all scenes in order
    pub async fn scenes(&self) -> Vec<Scene> {
        let scenes = self.scenes.lock().await;
        scenes.iter().map(|scene| self.synced(scene)).collect()
    }

    pub async fn scene(&self, id: &str) -> StudioResult<Scene> {
        let scenes = self.scenes.lock().await;
        find(&scenes, id).map(|scene| self.synced(scene))
    }

    fn synced(&self, scene: &Scene) -> Scene {
        let mut scene = scene.clone();
        scene.is_playing = self
            .player
            .is_playing(&PlaybackTarget::Scene(scene.id().to_string()));
        scene
    }

    /// Append a new scene
    pub async fn add_scene(&self, id: impl Into<String>, text: impl Into<String>) -> StudioResult<()> {
        let scene = Scene::new(id, text)?;
        let mut scenes = self.scenes.lock().await;
        if scenes.iter().any(|s| s.id() == scene.id()) {
            return Err(StudioError::DuplicateScene(scene.id().to_string()));
        }
        log::debug!("Added scene {}", scene.id());
        scenes.push(scene);
        Ok(())
    }

    /// Replace a scene's text. Its audio is cleared and any in-flight result
    /// for the old text will be discarded.
    pub async fn edit_text(&self, id: &str, text: impl Into<String>) -> StudioResult<()> {
        {
            let mut scenes = self.scenes.lock().await;
            let scene = find_mut(&mut scenes, id)?;
            scene.edit_text(text);
            log::debug!("Edited scene {id}");
        }

        let target = PlaybackTarget::Scene(id.to_string());
        if self.player.is_playing(&target) {
            self.player.stop().await;
        }
        Ok(())
    }

    /// Synthesize a scene's text with the selected voice.
    ///
    /// Fails with [`StudioError::SceneBusy`] if the scene is already
    /// generating. On failure the scene keeps whatever audio it had.
    pub async fn generate(&self, id: &str) -> StudioResult<()> {
        let voice = *self.voice.lock().await;
        let (text, revision) = {
            let mut scenes = self.scenes.lock().await;
            let scene = find_mut(&mut scenes, id)?;
            let revision = scene.begin_generation()?;
            (scene.text().to_string(), revision)
        };
        log::debug!("Generating scene {id} with voice {voice}");

        let result = self
            .provider
            .generate_speech(SpeechRequest::new(text, voice.identifier()))
            .await;

        let mut scenes = self.scenes.lock().await;
        let scene = find_mut(&mut scenes, id)?;
        match result {
            Ok(response) => {
                let bytes = response.audio.len();
                if !scene.finish_generation(revision, Some(response.audio)) {
                    log::warn!("Discarding audio for scene {id}: text changed during generation");
                    return Err(StudioError::TextChanged(id.to_string()));
                }
                log::info!("Generated scene {id} ({bytes} bytes of PCM)");
                Ok(())
            }
            Err(e) => {
                scene.finish_generation(revision, None);
                log::error!("Generation failed for scene {id}: {e}");
                Err(e.into())
            }
        }
    }

    /// Generate every scene without audio, one at a time in list order.
    pub async fn generate_all(&self) -> BatchReport {
        let ids: Vec<String> = {
            let scenes = self.scenes.lock().await;
            scenes.iter().map(|s| s.id().to_string()).collect()
        };

        let mut report = BatchReport::default();
        for id in ids {
            let status = match self.scene(&id).await {
                Ok(scene) => scene.status(),
                Err(e) => {
                    report.failed.push((id, e));
                    continue;
                }
            };
            if status != SceneStatus::Idle {
                report.skipped.push(id);
                continue;
            }

            match self.generate(&id).await {
                Ok(()) => report.generated.push(id),
                Err(StudioError::SceneBusy(_)) => report.skipped.push(id),
                Err(e) => report.failed.push((id, e)),
            }
        }

        log::info!(
            "Batch finished: {} generated, {} skipped, {} failed",
            report.generated.len(),
            report.skipped.len(),
            report.failed.len()
        );
        report
    }

    /// Save one scene as `{id}.wav` in `dir`
    pub async fn download(&self, id: &str, dir: &Path) -> StudioResult<PathBuf> {
        let (file_name, wav) = {
            let scenes = self.scenes.lock().await;
            let scene = find(&scenes, id)?;
            let audio = scene
                .audio()
                .ok_or_else(|| StudioError::SceneNotReady(id.to_string()))?;
            (scene.wav_filename(), audio.wav().clone())
        };
        export::write_wav(dir, &file_name, &wav).await
    }

    /// Save every scene that has audio, pausing before each file.
    pub async fn download_all(&self, dir: &Path) -> StudioResult<Vec<PathBuf>> {
        let pending: Vec<_> = {
            let scenes = self.scenes.lock().await;
            scenes
                .iter()
                .filter_map(|s| s.audio().map(|a| (s.wav_filename(), a.wav().clone())))
                .collect()
        };

        let mut saved = Vec::with_capacity(pending.len());
        for (file_name, wav) in pending {
            tokio::time::sleep(self.download_delay).await;
            saved.push(export::write_wav(dir, &file_name, &wav).await?);
        }
        Ok(saved)
    }

    /// Voices grouped by gender, female first
    pub fn voices(&self) -> Vec<(Gender, Vec<VoiceOption>)> {
        Gender::all()
            .iter()
            .map(|&gender| (gender, VoiceOption::by_gender(gender).copied().collect()))
            .collect()
    }

    pub async fn selected_voice(&self) -> VoiceOption {
        *self.voice.lock().await
    }

    pub async fn select_voice(&self, name: &str) -> StudioResult<VoiceOption> {
        let voice: VoiceOption = name.parse()?;
        *self.voice.lock().await = voice;
        log::debug!("Selected voice {voice}");
        Ok(voice)
    }

    pub async fn play_scene(&self, id: &str) -> StudioResult<()> {
        let pcm = {
            let scenes = self.scenes.lock().await;
            let scene = find(&scenes, id)?;
            let audio = scene
                .audio()
                .ok_or_else(|| StudioError::SceneNotReady(id.to_string()))?;
            audio.pcm().bytes.clone()
        };
        self.player
            .play(PlaybackTarget::Scene(id.to_string()), &pcm)
            .await?;
        Ok(())
    }

    /// Stop the scene if it is playing, otherwise play it. Returns whether
    /// the scene is now playing.
    pub async fn toggle_scene(&self, id: &str) -> StudioResult<bool> {
        if self.player.is_playing(&PlaybackTarget::Scene(id.to_string())) {
            self.player.stop().await;
            return Ok(false);
        }
        self.play_scene(id).await?;
        Ok(true)
    }

    /// Stop playback and cancel any preview still being synthesized
    pub async fn stop(&self) {
        if let Some(voice) = self.preview.lock().await.take() {
            log::debug!("Cancelled preview of voice {voice}");
        }
        self.player.stop().await;
    }

    /// Audition a voice by speaking the preview sentence with it
    pub async fn preview_voice(&self, name: &str) -> StudioResult<()> {
        let voice: VoiceOption = name.parse()?;
        self.player.stop().await;
        *self.preview.lock().await = Some(voice);
        log::debug!("Previewing voice {voice}");

        let result = self
            .provider
            .generate_speech(SpeechRequest::new(PREVIEW_TEXT, voice.identifier()))
            .await;

        let outcome: StudioResult<()> = async {
            let response = result?;
            // Stopped or superseded by another preview while synthesizing.
            if *self.preview.lock().await != Some(voice) {
                log::debug!("Dropping preview of voice {voice}");
                return Ok(());
            }
            self.player
                .play(PlaybackTarget::Voice(voice.name.to_string()), &response.audio.bytes)
                .await?;
            Ok(())
        }
        .await;

        {
            let mut preview = self.preview.lock().await;
            if *preview == Some(voice) {
                *preview = None;
            }
        }

        outcome.inspect_err(|e| log::error!("Preview failed for voice {voice}: {e}"))
    }

    /// Voice being previewed, whether still synthesizing or playing
    pub async fn previewing(&self) -> Option<VoiceOption> {
        if let Some(voice) = *self.preview.lock().await {
            return Some(voice);
        }
        match self.player.state() {
            PlaybackState::Playing(PlaybackTarget::Voice(name)) => VoiceOption::find(&name),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("provider", &self.provider.provider_name())
            .field("player", &self.player)
            .field("download_delay", &self.download_delay)
            .finish_non_exhaustive()
    }
}

fn find<'a>(scenes: &'a [Scene], id: &str) -> StudioResult<&'a Scene> {
    scenes
        .iter()
        .find(|s| s.id() == id)
        .ok_or_else(|| StudioError::SceneNotFound(id.to_string()))
}

fn find_mut<'a>(scenes: &'a mut [Scene], id: &str) -> StudioResult<&'a mut Scene> {
    scenes
        .iter_mut()
        .find(|s| s.id() == id)
        .ok_or_else(|| StudioError::SceneNotFound(id.to_string()))
}
