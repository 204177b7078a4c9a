//! Library exports for the wavdeck player and its tests.
/// Application directory resolution.
pub mod app_dirs;
/// Audio decoding, transport and device output.
pub mod audio;
/// User-authored configuration file.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Tracing subscriber setup.
pub mod logging;
/// Waveform thumbnails and their cache.
pub mod waveform;
