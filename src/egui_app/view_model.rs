//! Geometry helpers that turn player state into screen coordinates.

use egui::{Rect, pos2, vec2};

/// Horizontal pixel of the playback cursor inside `bounds`.
///
/// The cursor sits at the same fraction of the width as `position` is of
/// `length`. Returns `None` when the length is zero, negative or not finite.
pub fn cursor_x(position: f64, length: f64, bounds: Rect) -> Option<f32> {
    if !length.is_finite() || length <= 0.0 || !position.is_finite() {
        return None;
    }
    let fraction = position / length;
    Some((fraction * bounds.width() as f64 + bounds.left() as f64) as f32)
}

/// Horizontal band for `channel` when `count` channels share `bounds` equally.
pub fn channel_band(bounds: Rect, channel: usize, count: usize) -> Rect {
    let count = count.max(1);
    let height = bounds.height() / count as f32;
    Rect::from_min_size(
        pos2(bounds.left(), bounds.top() + height * channel as f32),
        vec2(bounds.width(), height),
    )
}

/// Vertical extent of a min/max column centred in `band`.
///
/// `vertical_zoom` scales the envelope; 1.0 maps full scale to the band edges.
pub fn column_span(band: Rect, min: f32, max: f32, vertical_zoom: f32) -> (f32, f32) {
    let centre = band.center().y;
    let half = band.height() * 0.5 * vertical_zoom;
    let top = (centre - max * half).clamp(band.top(), band.bottom());
    let bottom = (centre - min * half).clamp(band.top(), band.bottom());
    (top, bottom)
}
