//! WAV decoding into an in-memory interleaved `f32` buffer.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hound::SampleFormat;
use thiserror::Error;

use super::wav_header::repair_wav_header;

/// Files larger than this are rejected before any decoding happens.
pub const MAX_AUDIO_BYTES: u64 = 512 * 1024 * 1024;

/// Reasons a file could not be turned into [`DecodedAudio`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is {size_bytes} bytes, above the {limit_bytes} byte limit")]
    TooLarge {
        path: PathBuf,
        size_bytes: u64,
        limit_bytes: u64,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid wav {path}: {source}")]
    Invalid { path: PathBuf, source: hound::Error },
}

/// Decoded PCM ready for playback and thumbnail building.
///
/// Cloning is cheap; the sample buffer is shared.
#[derive(Clone, Debug)]
pub struct DecodedAudio {
    /// Interleaved samples scaled to `[-1.0, 1.0]`.
    pub samples: Arc<[f32]>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
}

impl DecodedAudio {
    /// Effective channel count (minimum 1).
    pub fn channel_count(&self) -> usize {
        self.channels.max(1) as usize
    }

    /// Number of whole frames in the buffer.
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channel_count()
    }

    /// Length in seconds; zero for an empty buffer or a zero sample rate.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Sample at `frame` for `channel`, or silence when out of range.
    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        let channels = self.channel_count();
        self.samples
            .get(frame * channels + channel.min(channels - 1))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Decode a WAV file from disk, enforcing [`MAX_AUDIO_BYTES`].
///
/// Zero-padded `fmt ` chunks are repaired before decoding.
pub fn decode_wav_file(path: &Path) -> Result<DecodedAudio, DecodeError> {
    let bytes = repair_wav_header(read_audio_bytes_with_limit(path, MAX_AUDIO_BYTES)?);
    decode_wav_bytes(&bytes).map_err(|source| DecodeError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode WAV bytes already in memory.
pub fn decode_wav_bytes(bytes: &[u8]) -> Result<DecodedAudio, hound::Error> {
    let mut reader = hound::WavReader::new(std::io::Cursor::new(bytes))?;
    let spec = reader.spec();
    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << spec.bits_per_sample.saturating_sub(1)).max(1) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };
    Ok(DecodedAudio {
        samples: Arc::from(samples),
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

fn read_audio_bytes_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>, DecodeError> {
    let size = std::fs::metadata(path)
        .map_err(|source| DecodeError::Metadata {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    let too_large = |size_bytes| DecodeError::TooLarge {
        path: path.to_path_buf(),
        size_bytes,
        limit_bytes: max_bytes,
    };
    if size > max_bytes {
        return Err(too_large(size));
    }
    let read_error = |source| DecodeError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_error)?;
    let mut bytes = Vec::with_capacity(size as usize);
    BufReader::new(file)
        .take(max_bytes + 1)
        .read_to_end(&mut bytes)
        .map_err(|source| DecodeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if bytes.len() as u64 > max_bytes {
        return Err(too_large(bytes.len() as u64));
    }
    Ok(bytes)
}
