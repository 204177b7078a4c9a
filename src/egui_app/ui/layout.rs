use eframe::egui::{Rect, Vec2, vec2};

/// Initial window size.
pub const WINDOW_SIZE: Vec2 = vec2(600.0, 400.0);

const MARGIN: f32 = 10.0;
const BUTTON_HEIGHT: f32 = 20.0;
const BUTTON_PITCH: f32 = 30.0;
const THUMBNAIL_TOP: f32 = 100.0;

/// Screen rectangles for every control, derived from the content bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerLayout {
    pub open: Rect,
    pub play: Rect,
    pub stop: Rect,
    pub thumbnail: Rect,
}

impl PlayerLayout {
    /// Lay out three full-width buttons stacked above the thumbnail.
    ///
    /// Offsets are fixed; only widths and the thumbnail height follow the
    /// window. Extents never go negative on tiny windows.
    pub fn for_bounds(bounds: Rect) -> Self {
        let width = bounds.width() - 2.0 * MARGIN;
        let button = |row: f32| {
            place(
                bounds,
                MARGIN,
                MARGIN + row * BUTTON_PITCH,
                width,
                BUTTON_HEIGHT,
            )
        };
        Self {
            open: button(0.0),
            play: button(1.0),
            stop: button(2.0),
            thumbnail: place(
                bounds,
                MARGIN,
                THUMBNAIL_TOP,
                width,
                bounds.height() - THUMBNAIL_TOP - 2.0 * MARGIN,
            ),
        }
    }
}

fn place(bounds: Rect, x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::from_min_size(bounds.min + vec2(x, y), vec2(width.max(0.0), height.max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn default_window_matches_fixed_offsets() {
        let layout = PlayerLayout::for_bounds(Rect::from_min_size(pos2(0.0, 0.0), WINDOW_SIZE));
        assert_eq!(layout.open, Rect::from_min_size(pos2(10.0, 10.0), vec2(580.0, 20.0)));
        assert_eq!(layout.play, Rect::from_min_size(pos2(10.0, 40.0), vec2(580.0, 20.0)));
        assert_eq!(layout.stop, Rect::from_min_size(pos2(10.0, 70.0), vec2(580.0, 20.0)));
        assert_eq!(
            layout.thumbnail,
            Rect::from_min_size(pos2(10.0, 100.0), vec2(580.0, 280.0))
        );
    }

    #[test]
    fn layout_follows_resize_and_origin() {
        let layout = PlayerLayout::for_bounds(Rect::from_min_size(pos2(5.0, 5.0), vec2(800.0, 600.0)));
        assert_eq!(layout.play.min, pos2(15.0, 45.0));
        assert_eq!(layout.play.width(), 780.0);
        assert_eq!(layout.thumbnail.height(), 480.0);
    }

    #[test]
    fn tiny_window_clamps_extents() {
        let layout = PlayerLayout::for_bounds(Rect::from_min_size(pos2(0.0, 0.0), vec2(12.0, 50.0)));
        assert_eq!(layout.open.width(), 0.0);
        assert_eq!(layout.thumbnail.height(), 0.0);
    }
}
