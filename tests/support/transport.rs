use wavdeck::audio::{DecodedAudio, Transport, TransportSource};

/// Device-free transport whose blocks are pulled by the test itself.
pub struct PulledTransport {
    pub source: TransportSource,
    pub channels: usize,
}

impl PulledTransport {
    pub fn new(device_rate: u32, channels: usize) -> Self {
        let mut source = TransportSource::new();
        source.prepare_to_play(256, device_rate);
        Self { source, channels }
    }

    /// Render `frames` frames as the audio callback would.
    pub fn pull(&mut self, frames: usize) -> Vec<f32> {
        let mut block = vec![0.0; frames * self.channels];
        self.source.next_audio_block(&mut block, self.channels);
        block
    }
}

impl Transport for PulledTransport {
    fn set_source(&mut self, source: Option<DecodedAudio>) {
        self.source.set_source(source);
    }

    fn start(&mut self) {
        self.source.start();
    }

    fn stop(&mut self) {
        self.source.stop();
    }

    fn set_position(&mut self, seconds: f64) {
        self.source.set_position(seconds);
    }

    fn current_position(&self) -> f64 {
        self.source.current_position()
    }

    fn length_in_seconds(&self) -> f64 {
        self.source.length_in_seconds()
    }

    fn is_playing(&self) -> bool {
        self.source.is_playing()
    }

    fn take_change(&mut self) -> bool {
        self.source.take_change()
    }
}
