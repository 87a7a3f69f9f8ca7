use super::AudioOutput;
use crate::codec::{self, PROVIDER_SAMPLE_RATE};
use crate::{AudioData, PlaybackError};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// What the playback slot is currently used for
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackTarget {
    /// A scene's synthesized narration, by scene id
    Scene(String),
    /// A voice audition, by voice name
    Voice(String),
}

impl fmt::Display for PlaybackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackTarget::Scene(id) => write!(f, "scene {id}"),
            PlaybackTarget::Voice(name) => write!(f, "voice {name}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(PlaybackTarget),
}

impl PlaybackState {
    pub fn is_idle(&self) -> bool {
        matches!(self, PlaybackState::Idle)
    }

    pub fn target(&self) -> Option<&PlaybackTarget> {
        match self {
            PlaybackState::Idle => None,
            PlaybackState::Playing(target) => Some(target),
        }
    }
}

struct ActiveSession {
    id: u64,
    target: PlaybackTarget,
    halt: Box<dyn FnOnce() + Send>,
}

#[derive(Default)]
struct Slot {
    next_id: u64,
    active: Option<ActiveSession>,
}

/// Owner of the single playback slot
///
/// At most one session plays at any time: `play` halts the previous session
/// before the next one starts. Completion is observed by the controller
/// itself, so every `Playing -> Idle` transition happens here.
pub struct PlaybackController {
    output: Arc<dyn AudioOutput>,
    slot: Arc<Mutex<Slot>>,
    state: Arc<watch::Sender<PlaybackState>>,
    sample_rate: u32,
}

impl PlaybackController {
    pub fn new(output: Arc<dyn AudioOutput>) -> Self {
        let (state, _) = watch::channel(PlaybackState::Idle);
        Self {
            output,
            slot: Arc::new(Mutex::new(Slot::default())),
            state: Arc::new(state),
            sample_rate: PROVIDER_SAMPLE_RATE,
        }
    }

    /// Override the rate PCM is assumed to be rendered at
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Decode `pcm` and play it for `target`, stopping whatever was playing.
    pub async fn play(&self, target: PlaybackTarget, pcm: &[u8]) -> Result<(), PlaybackError> {
        let audio = AudioData {
            samples: codec::pcm16_to_float_samples(pcm),
            channels: 1,
            sample_rate: self.sample_rate,
        };

        self.output.resume().await?;

        let mut slot = self.slot.lock().await;
        if let Some(previous) = slot.active.take() {
            log::debug!("Stopping {} to play {}", previous.target, target);
            (previous.halt)();
            self.state.send_replace(PlaybackState::Idle);
        }

        let (finished, halt) = self.output.start(audio)?.into_parts();

        slot.next_id += 1;
        let id = slot.next_id;
        slot.active = Some(ActiveSession {
            id,
            target: target.clone(),
            halt,
        });
        self.state.send_replace(PlaybackState::Playing(target.clone()));
        drop(slot);
        log::debug!("Playing {target} ({} bytes of PCM)", pcm.len());

        let slot = Arc::clone(&self.slot);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            // A dropped sender means the output went away; treat it as the end.
            let _ = finished.await;
            let mut slot = slot.lock().await;
            if slot.active.as_ref().is_some_and(|a| a.id == id) {
                slot.active = None;
                state.send_replace(PlaybackState::Idle);
                log::debug!("Finished {target}");
            }
        });

        Ok(())
    }

    /// Halt the current session, if any.
    pub async fn stop(&self) {
        let mut slot = self.slot.lock().await;
        if let Some(active) = slot.active.take() {
            log::debug!("Stopping {}", active.target);
            (active.halt)();
            self.state.send_replace(PlaybackState::Idle);
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state.borrow().clone()
    }

    pub fn is_playing(&self, target: &PlaybackTarget) -> bool {
        self.state.borrow().target() == Some(target)
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state.subscribe()
    }

    /// Resolve once nothing is playing
    pub async fn wait_until_idle(&self) {
        let mut rx = self.subscribe();
        let _ = rx.wait_for(PlaybackState::is_idle).await;
    }
}

impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state())
            .field("sample_rate", &self.sample_rate)
            .finish_non_exhaustive()
    }
}
