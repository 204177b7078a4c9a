use crate::audio::DecodedAudio;

/// Source frames folded into each peak bucket unless configured otherwise.
pub const DEFAULT_THUMBNAIL_RESOLUTION: usize = 512;

/// Low-resolution min/max envelope of a decoded file, one list per channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Thumbnail {
    resolution: usize,
    total_frames: usize,
    sample_rate: u32,
    peaks: Vec<Vec<(f32, f32)>>,
}

impl Thumbnail {
    /// Build the envelope, folding `resolution` frames into each bucket.
    pub fn build(audio: &DecodedAudio, resolution: usize) -> Self {
        let resolution = resolution.max(1);
        let channels = audio.channel_count();
        let total_frames = audio.frame_count();
        let bucket_count = total_frames.div_ceil(resolution);
        let mut peaks = vec![Vec::with_capacity(bucket_count); channels];
        for bucket in audio.samples[..total_frames * channels].chunks(resolution * channels) {
            for (channel, envelope) in peaks.iter_mut().enumerate() {
                let (min, max) = bucket
                    .iter()
                    .skip(channel)
                    .step_by(channels)
                    .fold((f32::MAX, f32::MIN), |(lo, hi), sample| {
                        (lo.min(*sample), hi.max(*sample))
                    });
                envelope.push((min.clamp(-1.0, 1.0), max.clamp(-1.0, 1.0)));
            }
        }
        Self {
            resolution,
            total_frames,
            sample_rate: audio.sample_rate,
            peaks,
        }
    }

    /// Number of channels represented.
    pub fn num_channels(&self) -> usize {
        self.peaks.len()
    }

    /// Total length of the source in seconds.
    pub fn total_length(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.total_frames as f64 / self.sample_rate as f64
    }

    /// Min/max pairs for `width` pixel columns spanning `start..end` seconds.
    ///
    /// Each column merges every bucket it overlaps, so narrow views never
    /// drop a peak. Out-of-range channels or empty sources yield flat columns.
    pub fn channel_columns(
        &self,
        channel: usize,
        start_time: f64,
        end_time: f64,
        width: usize,
    ) -> Vec<(f32, f32)> {
        let width = width.max(1);
        let mut columns = vec![(0.0_f32, 0.0_f32); width];
        let Some(peaks) = self.peaks.get(channel).filter(|peaks| !peaks.is_empty()) else {
            return columns;
        };
        let rate = self.sample_rate as f64;
        let start_frame = (start_time.max(0.0) * rate).floor() as usize;
        let end_frame = ((end_time * rate).ceil() as usize).min(self.total_frames);
        if end_frame <= start_frame {
            return columns;
        }

        let frames_in_view = (end_frame - start_frame) as f64;
        let last_bucket = peaks.len() - 1;
        for (x, column) in columns.iter_mut().enumerate() {
            let rel_start = (x as f64 * frames_in_view / width as f64).floor() as usize;
            let rel_end = (((x + 1) as f64 * frames_in_view / width as f64).ceil() as usize)
                .max(rel_start + 1);
            let abs_start = start_frame + rel_start;
            let abs_end = (start_frame + rel_end).min(end_frame).max(abs_start + 1);
            let first = (abs_start / self.resolution).min(last_bucket);
            let last = ((abs_end - 1) / self.resolution).clamp(first, last_bucket);

            let (min, max) = peaks[first..=last]
                .iter()
                .fold((1.0_f32, -1.0_f32), |(lo, hi), (min, max)| {
                    (lo.min(*min), hi.max(*max))
                });
            *column = if min > max { (0.0, 0.0) } else { (min, max) };
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn audio(samples: Vec<f32>, channels: u16) -> DecodedAudio {
        DecodedAudio {
            samples: Arc::from(samples),
            sample_rate: 8,
            channels,
        }
    }

    #[test]
    fn builds_one_envelope_per_channel() {
        let interleaved = vec![0.1, -0.5, 0.4, 0.2, -0.3, 0.9, 0.0, 0.0, 0.7, -0.1];
        let thumbnail = Thumbnail::build(&audio(interleaved, 2), 2);

        assert_eq!(thumbnail.num_channels(), 2);
        assert!((thumbnail.total_length() - 5.0 / 8.0).abs() < 1e-9);
        assert_eq!(thumbnail.peaks[0], vec![(0.1, 0.4), (-0.3, 0.0), (0.7, 0.7)]);
        assert_eq!(thumbnail.peaks[1], vec![(-0.5, 0.2), (0.0, 0.9), (-0.1, -0.1)]);
    }

    #[test]
    fn columns_cover_requested_width_and_keep_extremes() {
        let mut samples = vec![0.0; 64];
        samples[40] = 0.8;
        samples[41] = -0.6;
        let thumbnail = Thumbnail::build(&audio(samples, 1), 4);

        let columns = thumbnail.channel_columns(0, 0.0, thumbnail.total_length(), 3);
        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|(min, max)| min <= max));
        let max_peak = columns.iter().map(|(_, max)| *max).fold(f32::MIN, f32::max);
        let min_peak = columns.iter().map(|(min, _)| *min).fold(f32::MAX, f32::min);
        assert_eq!(max_peak, 0.8);
        assert_eq!(min_peak, -0.6);
    }

    #[test]
    fn empty_source_has_channels_but_flat_columns() {
        let thumbnail = Thumbnail::build(&audio(Vec::new(), 2), 512);
        assert_eq!(thumbnail.num_channels(), 2);
        assert_eq!(thumbnail.total_length(), 0.0);
        assert_eq!(thumbnail.channel_columns(0, 0.0, 1.0, 4), vec![(0.0, 0.0); 4]);
    }

    #[test]
    fn unknown_channel_yields_flat_columns() {
        let thumbnail = Thumbnail::build(&audio(vec![0.5; 16], 1), 4);
        assert_eq!(thumbnail.channel_columns(3, 0.0, 2.0, 2), vec![(0.0, 0.0); 2]);
    }
}
