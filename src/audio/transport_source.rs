use tracing::debug;

use super::decoder::DecodedAudio;

/// Playback position, start/stop flag and block renderer for one source.
///
/// The device callback and the UI thread share this behind a mutex. The UI
/// side starts, stops and seeks; the callback pulls blocks through
/// [`TransportSource::next_audio_block`]. Every start/stop transition, including
/// running off the end of the source, raises a change flag that the UI thread
/// consumes with [`TransportSource::take_change`].
#[derive(Debug, Default)]
pub struct TransportSource {
    source: Option<DecodedAudio>,
    /// Read head in source frames; fractional while resampling.
    position: f64,
    playing: bool,
    device_rate: Option<u32>,
    block_size: usize,
    changed: bool,
}

impl TransportSource {
    /// Create an unprepared transport with no source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the device format ahead of the first callback.
    pub fn prepare_to_play(&mut self, block_size: usize, device_rate: u32) {
        debug!("Transport prepared: block={block_size} rate={device_rate}Hz");
        self.block_size = block_size;
        self.device_rate = Some(device_rate).filter(|rate| *rate > 0);
    }

    /// Forget the device format; blocks render silence until prepared again.
    pub fn release_resources(&mut self) {
        self.device_rate = None;
        self.block_size = 0;
    }

    /// Block size passed to the last [`TransportSource::prepare_to_play`].
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Replace the source, stopping playback and rewinding to zero.
    pub fn set_source(&mut self, source: Option<DecodedAudio>) {
        if self.playing {
            self.playing = false;
            self.changed = true;
        }
        self.source = source;
        self.position = 0.0;
    }

    /// True when a source is attached.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Start playback from the current position.
    pub fn start(&mut self) {
        if self.playing || !self.has_source() {
            return;
        }
        self.playing = true;
        self.changed = true;
    }

    /// Halt playback, keeping the current position.
    pub fn stop(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        self.changed = true;
    }

    /// True while blocks are being read from the source.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Move the read head, clamped to the source length.
    pub fn set_position(&mut self, seconds: f64) {
        let Some(source) = self.source.as_ref() else {
            self.position = 0.0;
            return;
        };
        let seconds = if seconds.is_finite() { seconds } else { 0.0 };
        let frames = seconds * source.sample_rate as f64;
        self.position = frames.clamp(0.0, source.frame_count() as f64);
    }

    /// Read head in seconds.
    pub fn current_position(&self) -> f64 {
        match self.source.as_ref() {
            Some(source) if source.sample_rate > 0 => self.position / source.sample_rate as f64,
            _ => 0.0,
        }
    }

    /// Source length in seconds, zero without a source.
    pub fn length_in_seconds(&self) -> f64 {
        self.source
            .as_ref()
            .map(DecodedAudio::duration_seconds)
            .unwrap_or(0.0)
    }

    /// Consume the pending change notification, if any.
    pub fn take_change(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Fill an interleaved output block.
    ///
    /// Writes silence when unprepared, without a source, or while stopped.
    /// Otherwise source frames are linearly interpolated at
    /// `source_rate / device_rate` and output channel `c` reads source
    /// channel `c % source_channels`.
    pub fn next_audio_block(&mut self, out: &mut [f32], out_channels: usize) {
        out.fill(0.0);
        let Self {
            source,
            position,
            playing,
            device_rate,
            changed,
            ..
        } = self;
        let (Some(source), Some(device_rate)) = (source.as_ref(), *device_rate) else {
            return;
        };
        if !*playing || out_channels == 0 {
            return;
        }

        let total_frames = source.frame_count();
        let source_channels = source.channel_count();
        let step = source.sample_rate as f64 / device_rate as f64;
        for frame in out.chunks_exact_mut(out_channels) {
            if *position >= total_frames as f64 {
                *position = total_frames as f64;
                *playing = false;
                *changed = true;
                debug!("Transport reached end of source");
                break;
            }
            let base = position.floor() as usize;
            let frac = (*position - base as f64) as f32;
            let next = (base + 1).min(total_frames - 1);
            for (channel, sample) in frame.iter_mut().enumerate() {
                let src_channel = channel % source_channels;
                let a = source.sample(base, src_channel);
                let b = source.sample(next, src_channel);
                *sample = a + (b - a) * frac;
            }
            *position += step;
        }
    }
}
