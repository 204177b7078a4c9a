use std::path::{Path, PathBuf};
use std::sync::Arc;

use rfd::FileDialog;
use tracing::{debug, info, warn};

use super::state::{ButtonStates, TransportState};
use crate::audio::{Transport, decode_wav_file};
use crate::config::ThumbnailSettings;
use crate::waveform::{Thumbnail, ThumbnailCache, ThumbnailKey};

/// Title of the native open dialog.
pub const OPEN_DIALOG_TITLE: &str = "Select a Wave file to play...";

/// Owns the transport state machine, the loaded file and its thumbnail.
///
/// Every button click lands here. The controller never waits for audio: it
/// asks the transport to start or stop and settles `Starting`/`Stopping`
/// once the transport reports the change through [`Self::poll_transport`].
pub struct PlayerController<T: Transport> {
    transport: T,
    state: TransportState,
    buttons: ButtonStates,
    thumbnails: ThumbnailCache,
    thumbnail: Option<Arc<Thumbnail>>,
    thumbnail_resolution: usize,
    loaded_path: Option<PathBuf>,
}

impl<T: Transport> PlayerController<T> {
    /// Controller in the `Stopped` state with nothing loaded.
    pub fn new(transport: T, settings: &ThumbnailSettings) -> Self {
        Self {
            transport,
            state: TransportState::Stopped,
            buttons: ButtonStates::default(),
            thumbnails: ThumbnailCache::new(settings.cache_entries),
            thumbnail: None,
            thumbnail_resolution: settings.resolution,
            loaded_path: None,
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn buttons(&self) -> ButtonStates {
        self.buttons
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Thumbnail of the loaded file, if any.
    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_deref()
    }

    pub fn loaded_path(&self) -> Option<&Path> {
        self.loaded_path.as_deref()
    }

    /// Move to `new_state`, applying its button and transport side effects.
    ///
    /// Requesting the current state does nothing.
    pub fn change_state(&mut self, new_state: TransportState) {
        if self.state == new_state {
            return;
        }
        debug!("Transport state {:?} -> {:?}", self.state, new_state);
        self.state = new_state;
        match new_state {
            TransportState::Stopped => {
                self.buttons.stop = false;
                self.buttons.play = true;
                self.transport.set_position(0.0);
            }
            TransportState::Starting => {
                self.buttons.play = false;
                self.transport.start();
            }
            TransportState::Playing => {
                self.buttons.stop = true;
            }
            TransportState::Stopping => {
                self.transport.stop();
            }
        }
    }

    /// Settle local state on the transport's authoritative playing flag.
    pub fn transport_source_changed(&mut self) {
        let next = if self.transport.is_playing() {
            TransportState::Playing
        } else {
            TransportState::Stopped
        };
        self.change_state(next);
    }

    /// Handle a pending transport notification; returns whether one arrived.
    pub fn poll_transport(&mut self) -> bool {
        if !self.transport.take_change() {
            return false;
        }
        self.transport_source_changed();
        true
    }

    pub fn play_clicked(&mut self) {
        self.change_state(TransportState::Starting);
    }

    pub fn stop_clicked(&mut self) {
        self.change_state(TransportState::Stopping);
    }

    /// Show the native picker and load the chosen file.
    ///
    /// The dialog opens next to the last loaded file. Returns `false` when
    /// the user cancels or the file can't be decoded.
    pub fn open_file_via_dialog(&mut self) -> bool {
        let mut dialog = FileDialog::new()
            .set_title(OPEN_DIALOG_TITLE)
            .add_filter("Wave files", &["wav"]);
        if let Some(dir) = self.loaded_path.as_deref().and_then(Path::parent) {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return false;
        };
        self.open_file(&path)
    }

    /// Decode `path` and make it the playback source.
    ///
    /// A file that can't be decoded leaves the previous source, thumbnail and
    /// buttons untouched.
    ///
    /// The file is always decoded in full since the transport needs the
    /// samples; a thumbnail cache hit only skips the peak pass.
    pub fn open_file(&mut self, path: &Path) -> bool {
        let key = ThumbnailKey::for_path(path);
        let audio = match decode_wav_file(path) {
            Ok(audio) => audio,
            Err(err) => {
                warn!("Ignoring {}: {err}", path.display());
                return false;
            }
        };
        let resolution = self.thumbnail_resolution;
        let build = || Thumbnail::build(&audio, resolution);
        let thumbnail = match key {
            Some(key) => self.thumbnails.get_or_build(key, build),
            None => Arc::new(build()),
        };
        info!(
            "Loaded {} ({} ch, {} Hz, {:.2}s)",
            path.display(),
            audio.channels,
            audio.sample_rate,
            audio.duration_seconds()
        );
        self.transport.set_source(Some(audio));
        self.buttons.play = true;
        self.thumbnail = Some(thumbnail);
        self.loaded_path = Some(path.to_path_buf());
        true
    }
}

#[cfg(test)]
mod test_support;
