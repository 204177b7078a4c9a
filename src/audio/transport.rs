use std::sync::{Arc, Mutex};

use tracing::info;

use super::decoder::DecodedAudio;
use super::lock_transport;
use super::output::{AudioOutputConfig, AudioOutputError, CpalAudioStream, open_output_stream};
use super::transport_source::TransportSource;

/// Playback position and start/stop control for the loaded source.
///
/// The player controller only talks to this trait, so tests can drive it with
/// an in-memory double instead of a sound card.
pub trait Transport {
    /// Replace the playback source; `None` detaches the current one.
    fn set_source(&mut self, source: Option<DecodedAudio>);
    /// Begin playback from the current position.
    fn start(&mut self);
    /// Halt playback without moving the position.
    fn stop(&mut self);
    /// Move the playback position, in seconds.
    fn set_position(&mut self, seconds: f64);
    /// Current playback position, in seconds.
    fn current_position(&self) -> f64;
    /// Length of the current source, in seconds.
    fn length_in_seconds(&self) -> f64;
    /// Authoritative playing flag.
    fn is_playing(&self) -> bool;
    /// Consume a pending change notification.
    fn take_change(&mut self) -> bool;
}

/// [`Transport`] backed by a cpal output stream.
pub struct AudioTransport {
    source: Arc<Mutex<TransportSource>>,
    stream: Option<CpalAudioStream>,
}

impl AudioTransport {
    /// Open the configured output device and start its callback.
    pub fn open(config: &AudioOutputConfig) -> Result<Self, AudioOutputError> {
        let source = Arc::new(Mutex::new(TransportSource::new()));
        let outcome = open_output_stream(config, source.clone())?;
        Ok(Self {
            source,
            stream: Some(outcome.stream),
        })
    }

    /// Transport with no device attached; position and state still work but
    /// nothing advances playback.
    pub fn detached() -> Self {
        Self {
            source: Arc::new(Mutex::new(TransportSource::new())),
            stream: None,
        }
    }
}

impl Transport for AudioTransport {
    fn set_source(&mut self, source: Option<DecodedAudio>) {
        lock_transport(&self.source).set_source(source);
    }

    fn start(&mut self) {
        lock_transport(&self.source).start();
    }

    fn stop(&mut self) {
        lock_transport(&self.source).stop();
    }

    fn set_position(&mut self, seconds: f64) {
        lock_transport(&self.source).set_position(seconds);
    }

    fn current_position(&self) -> f64 {
        lock_transport(&self.source).current_position()
    }

    fn length_in_seconds(&self) -> f64 {
        lock_transport(&self.source).length_in_seconds()
    }

    fn is_playing(&self) -> bool {
        lock_transport(&self.source).is_playing()
    }

    fn take_change(&mut self) -> bool {
        lock_transport(&self.source).take_change()
    }
}

impl Drop for AudioTransport {
    fn drop(&mut self) {
        if self.stream.take().is_some() {
            info!("Audio output closed");
        }
        lock_transport(&self.source).release_resources();
    }
}
