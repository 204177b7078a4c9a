use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod decoder;
pub mod output;
pub mod transport;

mod device;
mod transport_source;
pub(crate) mod wav_header;

pub use decoder::{DecodeError, DecodedAudio, decode_wav_bytes, decode_wav_file};
pub use output::{AudioOutputConfig, AudioOutputError, ResolvedOutput};
pub use transport::{AudioTransport, Transport};
pub use transport_source::TransportSource;

/// Lock the shared transport, recovering the state if a holder panicked.
pub(crate) fn lock_transport(source: &Mutex<TransportSource>) -> MutexGuard<'_, TransportSource> {
    source.lock().unwrap_or_else(PoisonError::into_inner)
}
