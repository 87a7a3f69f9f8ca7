use super::{AudioOutput, OutputSession};
use crate::{AudioData, PlaybackError};
use std::time::Duration;
use tokio::sync::oneshot;

/// Headless output that discards samples but keeps real clip timing
///
/// Sessions complete after the clip's duration, so callers observe the same
/// `Playing -> Idle` transitions they would with a sound card.
#[derive(Debug, Default, Clone)]
pub struct SilentOutput;

impl SilentOutput {
    pub fn new() -> Self {
        Self
    }
}

impl AudioOutput for SilentOutput {
    fn start(&self, audio: AudioData) -> Result<OutputSession, PlaybackError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| PlaybackError::SessionFailed(e.to_string()))?;

        let (done_tx, done_rx) = oneshot::channel();
        let (halt_tx, halt_rx) = oneshot::channel::<()>();
        let duration = Duration::from_millis(audio.duration_ms());

        runtime.spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(duration) => {}
                _ = halt_rx => {}
            }
            let _ = done_tx.send(());
        });

        Ok(OutputSession::new(done_rx, move || {
            let _ = halt_tx.send(());
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(ms: u64) -> AudioData {
        AudioData {
            samples: vec![0.0; (24 * ms) as usize],
            channels: 1,
            sample_rate: 24000,
        }
    }

    #[tokio::test]
    async fn test_session_completes_after_clip() {
        let session = SilentOutput::new().start(clip(20)).unwrap();
        let (finished, _halt) = session.into_parts();
        tokio::time::timeout(Duration::from_secs(2), finished)
            .await
            .expect("silent clip should finish")
            .unwrap();
    }

    #[tokio::test]
    async fn test_halt_finishes_early() {
        let session = SilentOutput::new().start(clip(60_000)).unwrap();
        let (finished, halt) = session.into_parts();
        halt();
        tokio::time::timeout(Duration::from_secs(2), finished)
            .await
            .expect("halted clip should finish")
            .unwrap();
    }
}
