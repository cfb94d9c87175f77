use super::{AxisBounds, DataPoint, ScreenPoint};

/// Pixel size of the plot canvas and the padding kept around the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pad: f64,
}

impl Viewport {
    pub const DEFAULT: Viewport = Viewport {
        width: 600.0,
        height: 400.0,
        pad: 40.0,
    };

    pub const fn new(width: f64, height: f64, pad: f64) -> Self {
        Self { width, height, pad }
    }

    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.pad
    }

    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.pad
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Affine map between data space and screen space (y grows downward on screen).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotTransform {
    pub bounds: AxisBounds,
    pub viewport: Viewport,
}

impl PlotTransform {
    pub fn new(bounds: AxisBounds, viewport: Viewport) -> Self {
        Self { bounds, viewport }
    }

    pub fn sx(&self, x: f64) -> f64 {
        self.viewport.pad + (x - self.bounds.x_min) * self.x_scale()
    }

    pub fn sy(&self, y: f64) -> f64 {
        self.viewport.height - self.viewport.pad - (y - self.bounds.y_min) * self.y_scale()
    }

    pub fn to_screen(&self, point: DataPoint) -> ScreenPoint {
        ScreenPoint::new(self.sx(point.x), self.sy(point.y))
    }

    pub fn to_data(&self, point: ScreenPoint) -> DataPoint {
        let x = self.bounds.x_min + (point.x - self.viewport.pad) / self.x_scale();
        let y = self.bounds.y_min
            + (self.viewport.height - self.viewport.pad - point.y) / self.y_scale();
        DataPoint::new(x, y)
    }

    fn x_scale(&self) -> f64 {
        self.viewport.plot_width() / self.bounds.width()
    }

    fn y_scale(&self) -> f64 {
        self.viewport.plot_height() / self.bounds.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform() -> PlotTransform {
        PlotTransform::new(AxisBounds::default(), Viewport::DEFAULT)
    }

    #[test]
    fn bounds_corners_map_to_plot_corners() {
        let t = transform();
        let bottom_left = t.to_screen(DataPoint::new(-2.0, -2.0));
        assert!((bottom_left.x - 40.0).abs() < 1e-9);
        assert!((bottom_left.y - 360.0).abs() < 1e-9);
        let top_right = t.to_screen(DataPoint::new(t.bounds.x_max, t.bounds.y_max));
        assert!((top_right.x - 560.0).abs() < 1e-9);
        assert!((top_right.y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn screen_and_data_round_trip() {
        let t = transform();
        for point in [
            DataPoint::new(0.0, 2.0),
            DataPoint::new(3.3, -1.7),
            DataPoint::new(-2.0, 4.05),
        ] {
            let back = t.to_data(t.to_screen(point));
            assert!((back.x - point.x).abs() < 1e-12);
            assert!((back.y - point.y).abs() < 1e-12);
        }
    }
}
