//! egui renderer for the player window.
use std::time::Duration;

use eframe::egui::{self, Button, Color32, Rect, RichText, Ui};

use crate::audio::Transport;
use crate::egui_app::controller::PlayerController;

mod layout;
mod style;
mod waveform_view;

pub use layout::{PlayerLayout, WINDOW_SIZE};

/// Window title.
pub const APP_TITLE: &str = "wavdeck";

/// eframe application wrapping a [`PlayerController`].
pub struct EguiApp<T: Transport> {
    controller: PlayerController<T>,
    repaint_interval: Duration,
    visuals_set: bool,
}

impl<T: Transport> EguiApp<T> {
    /// Wrap a controller, repainting every `repaint_interval` to move the cursor.
    pub fn new(controller: PlayerController<T>, repaint_interval: Duration) -> Self {
        Self {
            controller,
            repaint_interval,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_buttons(&mut self, ui: &mut Ui, layout: &PlayerLayout) {
        let palette = style::palette();
        let buttons = self.controller.buttons();
        if transport_button(ui, layout.open, "Open...", palette.open_button, buttons.open) {
            self.controller.open_file_via_dialog();
        }
        if transport_button(ui, layout.play, "Play", palette.play_button, buttons.play) {
            self.controller.play_clicked();
        }
        if transport_button(ui, layout.stop, "Stop", palette.stop_button, buttons.stop) {
            self.controller.stop_clicked();
        }
    }
}

fn transport_button(ui: &mut Ui, rect: Rect, label: &str, fill: Color32, enabled: bool) -> bool {
    let fill = if enabled {
        fill
    } else {
        style::disabled_fill(fill)
    };
    let button = Button::new(RichText::new(label).color(Color32::WHITE)).fill(fill);
    ui.add_enabled_ui(enabled, |ui| ui.put(rect, button))
        .inner
        .clicked()
}

impl<T: Transport> eframe::App for EguiApp<T> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_transport();
        let palette = style::palette();
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(palette.window_bg))
            .show(ctx, |ui| {
                let layout = PlayerLayout::for_bounds(ui.max_rect());
                self.render_buttons(ui, &layout);
                waveform_view::paint_waveform(
                    ui.painter(),
                    layout.thumbnail,
                    self.controller.thumbnail(),
                    self.controller.transport().current_position(),
                    &palette,
                );
            });
        ctx.request_repaint_after(self.repaint_interval);
    }
}
