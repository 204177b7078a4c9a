//! Entry point for the wavdeck player window.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use tracing::warn;
use wavdeck::audio::AudioTransport;
use wavdeck::config::{self, AppConfig};
use wavdeck::egui_app::controller::PlayerController;
use wavdeck::egui_app::ui::{APP_TITLE, EguiApp, WINDOW_SIZE};
use wavdeck::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = config::load_or_default().unwrap_or_else(|err| {
        warn!("Using default settings: {err}");
        AppConfig::default()
    });
    let transport = AudioTransport::open(&config.audio_output).unwrap_or_else(|err| {
        warn!("Audio output unavailable, playback disabled: {err}");
        AudioTransport::detached()
    });
    let controller = PlayerController::new(transport, &config.thumbnail);
    let app = EguiApp::new(controller, config.ui.repaint_interval());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size(WINDOW_SIZE),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}
