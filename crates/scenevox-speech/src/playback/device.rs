use super::{AudioOutput, OutputSession};
use crate::{AudioData, PlaybackError};
use async_trait::async_trait;
use rodio::mixer::Mixer;
use rodio::{OutputStreamBuilder, Sink};
use std::sync::{Arc, Mutex, mpsc};
use tokio::sync::{OnceCell, oneshot};

/// Output on the default audio device
///
/// The device is opened by the first `resume` call and kept for the lifetime
/// of the output; it is never reopened. The OS stream lives on its own thread
/// because it cannot move between threads on every platform.
#[derive(Default)]
pub struct RodioOutput {
    device: OnceCell<Mutex<Device>>,
}

struct Device {
    mixer: Mixer,
    // Dropping this sender ends the stream thread.
    _close: mpsc::Sender<()>,
}

impl RodioOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

fn open_default_device() -> Result<Device, PlaybackError> {
    let (ready_tx, ready_rx) = mpsc::channel();
    let (close_tx, close_rx) = mpsc::channel::<()>();

    std::thread::Builder::new()
        .name("scenevox-audio".into())
        .spawn(move || match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => {
                let _ = ready_tx.send(Ok(stream.mixer().clone()));
                // Blocks until the owning RodioOutput is dropped.
                let _ = close_rx.recv();
                drop(stream);
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e.to_string()));
            }
        })
        .map_err(|e| PlaybackError::OutputUnavailable(e.to_string()))?;

    let mixer = ready_rx
        .recv()
        .map_err(|e| PlaybackError::OutputUnavailable(e.to_string()))?
        .map_err(PlaybackError::OutputUnavailable)?;

    Ok(Device {
        mixer,
        _close: close_tx,
    })
}

#[async_trait]
impl AudioOutput for RodioOutput {
    async fn resume(&self) -> Result<(), PlaybackError> {
        self.device
            .get_or_try_init(|| async {
                // Opening blocks until the stream thread reports back.
                let device = tokio::task::spawn_blocking(open_default_device)
                    .await
                    .map_err(|e| PlaybackError::OutputUnavailable(e.to_string()))??;
                log::debug!("Opened default audio output");
                Ok::<_, PlaybackError>(Mutex::new(device))
            })
            .await
            .map(|_| ())
    }

    fn start(&self, audio: AudioData) -> Result<OutputSession, PlaybackError> {
        let mixer = self
            .device
            .get()
            .ok_or_else(|| PlaybackError::OutputUnavailable("device not opened".into()))?
            .lock()
            .map_err(|_| PlaybackError::OutputUnavailable("device lock poisoned".into()))?
            .mixer
            .clone();
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| PlaybackError::SessionFailed(e.to_string()))?;

        let sink = Arc::new(Sink::connect_new(&mixer));
        let source = rodio::buffer::SamplesBuffer::new(
            audio.channels as u16,
            audio.sample_rate,
            audio.samples,
        );
        sink.append(source);

        let (done_tx, done_rx) = oneshot::channel();
        let waiter = Arc::clone(&sink);
        runtime.spawn_blocking(move || {
            waiter.sleep_until_end();
            let _ = done_tx.send(());
        });

        Ok(OutputSession::new(done_rx, move || sink.stop()))
    }
}
