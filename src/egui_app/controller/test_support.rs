use std::path::{Path, PathBuf};

use super::*;
use crate::audio::{DecodedAudio, TransportSource};
use crate::config::ThumbnailSettings;

/// Transport double that records calls and mirrors the real state rules.
#[derive(Default)]
pub(super) struct RecordingTransport {
    pub(super) inner: TransportSource,
    pub(super) calls: Vec<&'static str>,
}

impl Transport for RecordingTransport {
    fn set_source(&mut self, source: Option<DecodedAudio>) {
        self.calls.push("set_source");
        self.inner.set_source(source);
    }

    fn start(&mut self) {
        self.calls.push("start");
        self.inner.start();
    }

    fn stop(&mut self) {
        self.calls.push("stop");
        self.inner.stop();
    }

    fn set_position(&mut self, seconds: f64) {
        self.calls.push("set_position");
        self.inner.set_position(seconds);
    }

    fn current_position(&self) -> f64 {
        self.inner.current_position()
    }

    fn length_in_seconds(&self) -> f64 {
        self.inner.length_in_seconds()
    }

    fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    fn take_change(&mut self) -> bool {
        self.inner.take_change()
    }
}

pub(super) fn controller() -> PlayerController<RecordingTransport> {
    PlayerController::new(RecordingTransport::default(), &ThumbnailSettings::default())
}

pub(super) fn write_test_wav(path: &Path, samples: &[f32]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav writer");
    for &sample in samples {
        writer.write_sample(sample).expect("write wav sample");
    }
    writer.finalize().expect("finalize wav");
}

/// Controller with a two-second mono file already loaded.
pub(super) fn loaded_controller() -> (PlayerController<RecordingTransport>, tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    write_test_wav(&path, &[0.5; 16]);
    let mut controller = controller();
    assert!(controller.open_file(&path));
    controller.transport.calls.clear();
    (controller, dir, path)
}
