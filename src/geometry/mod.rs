//! Data/screen coordinates and the clipping that turns a rule into drawable shapes.

mod bounds;
mod clip;
mod viewport;

pub use bounds::{AxisBounds, DEFAULT_MAX, FIXED_MIN};
pub use clip::{clip_half_plane, clip_segment, decision_line};
pub use viewport::{PlotTransform, Viewport};

/// Position in feature space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: DataPoint, t: f64) -> DataPoint {
        DataPoint::new(self.x + t * (other.x - self.x), self.y + t * (other.y - self.y))
    }
}

/// Position on the plot canvas in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> ScreenPoint {
        ScreenPoint::new(self.x + dx, self.y + dy)
    }
}

/// Visible part of a boundary line in data space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: DataPoint,
    pub end: DataPoint,
}

impl Segment {
    pub const fn new(start: DataPoint, end: DataPoint) -> Self {
        Self { start, end }
    }

    pub fn point_at(&self, t: f64) -> DataPoint {
        self.start.lerp(self.end, t)
    }

    pub fn midpoint(&self) -> DataPoint {
        self.point_at(0.5)
    }
}
