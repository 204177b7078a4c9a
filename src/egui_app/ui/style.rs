use eframe::egui::{Color32, Stroke, Visuals};

#[derive(Clone, Copy)]
pub struct Palette {
    pub window_bg: Color32,
    pub thumbnail_bg: Color32,
    pub waveform: Color32,
    pub cursor: Color32,
    pub text: Color32,
    pub open_button: Color32,
    pub play_button: Color32,
    pub stop_button: Color32,
}

pub fn palette() -> Palette {
    Palette {
        window_bg: Color32::from_rgb(39, 47, 57),
        thumbnail_bg: Color32::from_rgb(54, 60, 69),
        waveform: Color32::from_rgb(250, 196, 47),
        cursor: Color32::from_rgb(156, 209, 201),
        text: Color32::WHITE,
        open_button: Color32::from_rgb(97, 95, 107),
        play_button: Color32::from_rgb(100, 194, 172),
        stop_button: Color32::from_rgb(253, 126, 128),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.window_bg;
    visuals.panel_fill = palette.window_bg;
    visuals.override_text_color = Some(palette.text);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, palette.text);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, palette.text);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, palette.text);
}

/// Dimmed fill for a button that can't be clicked.
pub fn disabled_fill(color: Color32) -> Color32 {
    color.gamma_multiply(0.45)
}
