use crate::geometry::ScreenPoint;

/// Horizontal advance per character, in em.
pub const ADVANCE_EM: f64 = 0.56;
/// Height above the baseline, in em.
pub const ASCENT_EM: f64 = 0.9;
/// Depth below the baseline, in em.
pub const DESCENT_EM: f64 = 0.25;

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap; rectangles that only touch do not intersect.
    pub fn intersects(&self, other: &ScreenRect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Estimated box of left-aligned text whose baseline starts at `origin`.
pub fn measure(text: &str, font_size: f64, origin: ScreenPoint) -> ScreenRect {
    let width = text.chars().count() as f64 * ADVANCE_EM * font_size;
    ScreenRect::new(
        origin.x,
        origin.y - ASCENT_EM * font_size,
        width,
        (ASCENT_EM + DESCENT_EM) * font_size,
    )
}
