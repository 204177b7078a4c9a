use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use super::device::device_label;
use super::transport_source::TransportSource;
use super::lock_transport;

/// Block size reported to the transport when the device leaves it unspecified.
const DEFAULT_BLOCK_SIZE: usize = 512;

/// Errors that can occur while opening an audio output.
#[derive(Debug, Error)]
pub enum AudioOutputError {
    /// No audio output devices are available on the host.
    #[error("No audio output devices found")]
    NoOutputDevices,
    /// Failed to enumerate output devices on the host.
    #[error("Could not list output devices: {source}")]
    ListOutputDevices {
        /// Underlying cpal error.
        source: cpal::DevicesError,
    },
    /// Failed to resolve the default output config for a device.
    #[error("Default config error for {host_id}: {source}")]
    DefaultConfig {
        /// Host identifier used for the query.
        host_id: String,
        /// Underlying cpal error.
        source: cpal::DefaultStreamConfigError,
    },
    /// Failed to build an output stream, including the default-device retry.
    #[error("Failed to build stream: {source}")]
    BuildStream {
        /// Underlying cpal error.
        source: cpal::BuildStreamError,
    },
    /// Failed to start playback on an output stream.
    #[error("Playback failed to start: {source}")]
    PlayStream {
        /// Underlying cpal error.
        source: cpal::PlayStreamError,
    },
}

/// Output preferences read from the `[audio_output]` config section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AudioOutputConfig {
    /// Preferred host identifier (e.g., "wasapi", "alsa").
    #[serde(default)]
    pub host: Option<String>,
    /// Preferred device name.
    #[serde(default)]
    pub device: Option<String>,
    /// Preferred sample rate in Hz.
    #[serde(default)]
    pub sample_rate: Option<u32>,
    /// Preferred buffer size in frames.
    #[serde(default)]
    pub buffer_size: Option<u32>,
}

/// Actual output parameters in use after opening an audio stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOutput {
    /// Host identifier used to open the stream.
    pub host_id: String,
    /// Human-readable device name.
    pub device_name: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Buffer size in frames, if configurable.
    pub buffer_size_frames: Option<u32>,
    /// Channel count provided by the device.
    pub channel_count: u16,
    /// Whether a fallback host, device or config was chosen.
    pub used_fallback: bool,
}

/// Keeps the cpal stream alive; dropping it stops the device callback.
pub struct CpalAudioStream {
    _stream: cpal::Stream,
}

/// Stream creation result that keeps both the stream handle and resolved settings.
pub struct OpenStreamOutcome {
    /// Running output stream.
    pub stream: CpalAudioStream,
    /// Resolved output configuration used to open the stream.
    pub resolved: ResolvedOutput,
}

/// Open an output stream that pulls blocks from `transport`.
///
/// Unknown hosts or devices fall back to the system default. The transport
/// is prepared with the final device format before the stream starts.
pub fn open_output_stream(
    config: &AudioOutputConfig,
    transport: Arc<Mutex<TransportSource>>,
) -> Result<OpenStreamOutcome, AudioOutputError> {
    let (host, host_id, host_fallback) = resolve_host(config.host.as_deref());
    let (device, device_name, device_fallback) = resolve_device(&host, config.device.as_deref())?;
    let stream_config = requested_stream_config(&device, &host_id, config)?;

    let attempt = build_stream(&device, &stream_config, transport.clone());
    let (stream, stream_config, resolved_host, resolved_device, used_fallback) = match attempt {
        Ok(stream) => (
            stream,
            stream_config,
            host_id,
            device_name,
            host_fallback || device_fallback,
        ),
        Err(err) => {
            warn!("Output stream on \"{device_name}\" failed ({err}); retrying default device");
            let default_host = cpal::default_host();
            let default_id = default_host.id().name().to_string();
            let fallback_device = default_host
                .default_output_device()
                .ok_or(AudioOutputError::BuildStream { source: err })?;
            let fallback_config: cpal::StreamConfig = fallback_device
                .default_output_config()
                .map_err(|source| AudioOutputError::DefaultConfig {
                    host_id: default_id.clone(),
                    source,
                })?
                .into();
            let stream = build_stream(&fallback_device, &fallback_config, transport.clone())
                .map_err(|source| AudioOutputError::BuildStream { source })?;
            let name = device_label(&fallback_device).unwrap_or_else(|| "Default device".into());
            (stream, fallback_config, default_id, name, true)
        }
    };

    let buffer_size_frames = match stream_config.buffer_size {
        cpal::BufferSize::Default => None,
        cpal::BufferSize::Fixed(size) => Some(size),
    };
    lock_transport(&transport).prepare_to_play(
        buffer_size_frames
            .map(|size| size as usize)
            .unwrap_or(DEFAULT_BLOCK_SIZE),
        stream_config.sample_rate.0,
    );
    stream
        .play()
        .map_err(|source| AudioOutputError::PlayStream { source })?;

    let resolved = ResolvedOutput {
        host_id: resolved_host,
        device_name: resolved_device,
        sample_rate: stream_config.sample_rate.0,
        buffer_size_frames,
        channel_count: stream_config.channels,
        used_fallback,
    };
    info!(
        "Audio output ready: host={} device=\"{}\" rate={}Hz channels={} buffer={:?} fallback={}",
        resolved.host_id,
        resolved.device_name,
        resolved.sample_rate,
        resolved.channel_count,
        resolved.buffer_size_frames,
        resolved.used_fallback
    );
    Ok(OpenStreamOutcome {
        stream: CpalAudioStream { _stream: stream },
        resolved,
    })
}

fn requested_stream_config(
    device: &cpal::Device,
    host_id: &str,
    config: &AudioOutputConfig,
) -> Result<cpal::StreamConfig, AudioOutputError> {
    let mut stream_config: cpal::StreamConfig = device
        .default_output_config()
        .map_err(|source| AudioOutputError::DefaultConfig {
            host_id: host_id.to_string(),
            source,
        })?
        .into();
    if let Some(rate) = config.sample_rate.filter(|rate| *rate > 0) {
        stream_config.sample_rate = cpal::SampleRate(rate);
    }
    if let Some(size) = config.buffer_size.filter(|size| *size > 0) {
        stream_config.buffer_size = cpal::BufferSize::Fixed(size);
    }
    Ok(stream_config)
}

fn build_stream(
    device: &cpal::Device,
    stream_config: &cpal::StreamConfig,
    transport: Arc<Mutex<TransportSource>>,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    let channels = stream_config.channels as usize;
    device.build_output_stream(
        stream_config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            lock_transport(&transport).next_audio_block(data, channels);
        },
        |err| error!("Output stream error: {err}"),
        None,
    )
}

fn resolve_host(id: Option<&str>) -> (cpal::Host, String, bool) {
    let default_host = cpal::default_host();
    let default_id = default_host.id().name().to_string();
    let Some(requested) = id else {
        return (default_host, default_id, false);
    };
    let host = cpal::available_hosts()
        .into_iter()
        .find(|candidate| candidate.name().eq_ignore_ascii_case(requested))
        .and_then(|id| cpal::host_from_id(id).ok());
    match host {
        Some(host) => {
            let resolved = host.id().name().to_string();
            (host, resolved, false)
        }
        None => {
            warn!("Audio host \"{requested}\" unavailable; using {default_id}");
            (default_host, default_id, true)
        }
    }
}

fn resolve_device(
    host: &cpal::Host,
    name: Option<&str>,
) -> Result<(cpal::Device, String, bool), AudioOutputError> {
    let default_device = host
        .default_output_device()
        .ok_or(AudioOutputError::NoOutputDevices)?;
    let default_name = device_label(&default_device).unwrap_or_else(|| "Default device".into());
    let Some(requested) = name else {
        return Ok((default_device, default_name, false));
    };
    let chosen = host
        .output_devices()
        .map_err(|source| AudioOutputError::ListOutputDevices { source })?
        .find(|device| device_label(device).as_deref() == Some(requested));
    match chosen {
        Some(device) => Ok((device, requested.to_string(), false)),
        None => {
            warn!("Output device \"{requested}\" not found; using \"{default_name}\"");
            Ok((default_device, default_name, true))
        }
    }
}
