use crate::geometry::ScreenPoint;
use crate::layout::ScreenRect;
use crate::transition::Arrow;

/// Straight RGB colour with an opacity in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, ignoring opacity.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub mod palette {
    use super::Rgba;

    pub const REGION: Rgba = Rgba::rgb(255, 165, 0).with_alpha(0.25);
    pub const BOUNDARY: Rgba = Rgba::rgb(0xd9, 0x77, 0x06);
    pub const POSITIVE: Rgba = Rgba::rgb(255, 165, 0);
    pub const NEGATIVE: Rgba = Rgba::rgb(128, 0, 128);
    pub const INK: Rgba = Rgba::rgb(0x11, 0x11, 0x11);
    pub const ARROW: Rgba = Rgba::rgb(0, 0, 0);
    pub const GRID: Rgba = Rgba::rgb(0xd6, 0xd6, 0xd6);
    pub const AXIS: Rgba = Rgba::rgb(0x99, 0x99, 0x99);
    pub const BORDER: Rgba = Rgba::rgb(0xbb, 0xbb, 0xbb);
    pub const TICK_TEXT: Rgba = Rgba::rgb(0x44, 0x44, 0x44);
    pub const TITLE_TEXT: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

/// Horizontal alignment of a text run relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Baseline point the anchor refers to.
    pub position: ScreenPoint,
    pub font_size: f64,
    pub bold: bool,
    pub color: Rgba,
    pub anchor: TextAnchor,
    /// Clockwise rotation about `position`, in degrees.
    pub rotation: f64,
}

impl TextRun {
    pub fn new(text: impl Into<String>, position: ScreenPoint, font_size: f64, color: Rgba) -> Self {
        Self {
            text: text.into(),
            position,
            font_size,
            bold: false,
            color,
            anchor: TextAnchor::Start,
            rotation: 0.0,
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn anchored(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

/// One drawing instruction in screen space, painted in list order.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Polygon {
        points: Vec<ScreenPoint>,
        fill: Rgba,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        stroke: Stroke,
    },
    Rect {
        rect: ScreenRect,
        stroke: Stroke,
    },
    Circle {
        center: ScreenPoint,
        radius: f64,
        fill: Rgba,
    },
    Text(TextRun),
    Arrow {
        arrow: Arrow,
        stroke: Stroke,
    },
}
