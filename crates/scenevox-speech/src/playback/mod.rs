//! Audio playback.
//!
//! [`PlaybackController`] owns the single playback slot shared by scene
//! playback and voice previews. Outputs implement [`AudioOutput`]: they turn a
//! decoded buffer into sound and hand back an [`OutputSession`] whose
//! completion future the controller awaits.

mod controller;
#[cfg(feature = "playback")]
mod device;
mod silent;

pub use controller::{PlaybackController, PlaybackState, PlaybackTarget};
#[cfg(feature = "playback")]
pub use device::RodioOutput;
pub use silent::SilentOutput;

use crate::{AudioData, PlaybackError};
use async_trait::async_trait;
use tokio::sync::oneshot;

/// A device capable of playing decoded audio
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Open or wake the output. Called before every `start`, outside the
    /// playback slot lock.
    async fn resume(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    /// Start playing `audio` immediately
    fn start(&self, audio: AudioData) -> Result<OutputSession, PlaybackError>;
}

/// One active output started by an [`AudioOutput`]
pub struct OutputSession {
    finished: oneshot::Receiver<()>,
    halt: Box<dyn FnOnce() + Send>,
}

impl OutputSession {
    /// `finished` fires when the audio runs out; `halt` cuts it short.
    pub fn new(finished: oneshot::Receiver<()>, halt: impl FnOnce() + Send + 'static) -> Self {
        Self {
            finished,
            halt: Box::new(halt),
        }
    }

    pub(crate) fn into_parts(self) -> (oneshot::Receiver<()>, Box<dyn FnOnce() + Send>) {
        (self.finished, self.halt)
    }
}

impl std::fmt::Debug for OutputSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSession").finish_non_exhaustive()
    }
}
