use eframe::egui::{self, Align2, FontId, Painter, Rect, Stroke, pos2};

use super::style::Palette;
use crate::egui_app::view_model::{channel_band, column_span, cursor_x};
use crate::waveform::Thumbnail;

const NO_FILE_MESSAGE: &str = "No file loaded";
const CURSOR_WIDTH: f32 = 2.0;
const VERTICAL_ZOOM: f32 = 1.0;

/// Paint the thumbnail region: a placeholder when nothing is loaded,
/// otherwise every channel plus the playback cursor.
pub(super) fn paint_waveform(
    painter: &Painter,
    bounds: Rect,
    thumbnail: Option<&Thumbnail>,
    position: f64,
    palette: &Palette,
) {
    painter.rect_filled(bounds, 0.0, palette.thumbnail_bg);
    let Some(thumbnail) = thumbnail.filter(|thumbnail| thumbnail.num_channels() > 0) else {
        paint_no_file(painter, bounds, palette);
        return;
    };
    let length = thumbnail.total_length();
    draw_channels(painter, thumbnail, bounds, 0.0, length, palette);
    if let Some(x) = cursor_x(position, length, bounds) {
        painter.line_segment(
            [pos2(x, bounds.top()), pos2(x, bounds.bottom())],
            Stroke::new(CURSOR_WIDTH, palette.cursor),
        );
    }
}

fn paint_no_file(painter: &Painter, bounds: Rect, palette: &Palette) {
    painter.text(
        bounds.center(),
        Align2::CENTER_CENTER,
        NO_FILE_MESSAGE,
        FontId::proportional(14.0),
        palette.text,
    );
}

fn draw_channels(
    painter: &Painter,
    thumbnail: &Thumbnail,
    bounds: Rect,
    start_time: f64,
    end_time: f64,
    palette: &Palette,
) {
    let width = bounds.width().floor() as usize;
    if width == 0 || bounds.height() <= 0.0 {
        return;
    }
    let stroke = Stroke::new(1.0, palette.waveform);
    let count = thumbnail.num_channels();
    for channel in 0..count {
        let band = channel_band(bounds, channel, count);
        let columns = thumbnail.channel_columns(channel, start_time, end_time, width);
        let shapes = columns.into_iter().enumerate().map(|(x, (min, max))| {
            let (top, bottom) = column_span(band, min, max, VERTICAL_ZOOM);
            let x = band.left() + x as f32 + 0.5;
            egui::Shape::line_segment([pos2(x, top), pos2(x, bottom.max(top + 1.0))], stroke)
        });
        painter.extend(shapes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::DecodedAudio;
    use crate::egui_app::ui::style::palette;
    use eframe::egui::{Shape, vec2};
    use std::sync::Arc;

    fn bounds() -> Rect {
        Rect::from_min_size(pos2(10.0, 100.0), vec2(80.0, 60.0))
    }

    fn painted(thumbnail: Option<&Thumbnail>, position: f64) -> Vec<Shape> {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = Painter::new(ctx.clone(), egui::LayerId::background(), Rect::EVERYTHING);
            paint_waveform(&painter, bounds(), thumbnail, position, &palette());
        });
        output.shapes.into_iter().map(|clipped| clipped.shape).collect()
    }

    fn segments(shapes: &[Shape], color: egui::Color32) -> Vec<[egui::Pos2; 2]> {
        shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::LineSegment { points, stroke } if stroke.color == color => Some(*points),
                _ => None,
            })
            .collect()
    }

    fn has_placeholder(shapes: &[Shape]) -> bool {
        shapes.iter().any(|shape| {
            matches!(shape, Shape::Text(text) if text.galley.text() == NO_FILE_MESSAGE)
        })
    }

    #[test]
    fn placeholder_without_thumbnail() {
        let shapes = painted(None, 0.0);
        assert!(has_placeholder(&shapes));
        assert!(segments(&shapes, palette().waveform).is_empty());
        assert!(segments(&shapes, palette().cursor).is_empty());
    }

    #[test]
    fn loaded_thumbnail_draws_columns_and_cursor() {
        let audio = DecodedAudio {
            samples: Arc::from(vec![0.5_f32; 16]),
            sample_rate: 8,
            channels: 1,
        };
        let thumbnail = Thumbnail::build(&audio, 4);

        let shapes = painted(Some(&thumbnail), 1.0);

        assert!(!has_placeholder(&shapes));
        assert_eq!(segments(&shapes, palette().waveform).len(), 80);
        let cursor = segments(&shapes, palette().cursor);
        assert_eq!(cursor.len(), 1);
        assert_eq!(cursor[0][0], pos2(50.0, 100.0));
        assert_eq!(cursor[0][1], pos2(50.0, 160.0));
    }
}
