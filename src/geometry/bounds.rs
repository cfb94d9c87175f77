use crate::perceptron::Example;

use super::DataPoint;

/// Both axes start here so the frame stays put while learners work.
pub const FIXED_MIN: f64 = -2.0;
/// Upper bound used before any example pushes it further.
pub const DEFAULT_MAX: f64 = 3.5;
const HEADROOM: f64 = 0.10;
const MIN_SPAN: f64 = 0.5;
const CONTAINS_EPS: f64 = 1e-9;

/// Visible data-space rectangle, recomputed from the examples on each render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self::from_examples(&[])
    }
}

impl AxisBounds {
    pub fn from_examples(examples: &[Example]) -> Self {
        let (x_max, y_max) = examples.iter().fold(
            (DEFAULT_MAX, DEFAULT_MAX),
            |(x_max, y_max), example| (x_max.max(example.feat1), y_max.max(example.feat2)),
        );
        Self {
            x_min: FIXED_MIN,
            x_max: with_headroom(x_max),
            y_min: FIXED_MIN,
            y_max: with_headroom(y_max),
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Inclusive containment with a small tolerance for points on an edge.
    pub fn contains(&self, point: DataPoint) -> bool {
        point.x >= self.x_min - CONTAINS_EPS
            && point.x <= self.x_max + CONTAINS_EPS
            && point.y >= self.y_min - CONTAINS_EPS
            && point.y <= self.y_max + CONTAINS_EPS
    }

    /// Corners in counter-clockwise order starting at the bottom-left.
    pub fn corners(&self) -> [DataPoint; 4] {
        [
            DataPoint::new(self.x_min, self.y_min),
            DataPoint::new(self.x_max, self.y_min),
            DataPoint::new(self.x_max, self.y_max),
            DataPoint::new(self.x_min, self.y_max),
        ]
    }
}

fn with_headroom(max: f64) -> f64 {
    let span = (max - FIXED_MIN).max(1e-9);
    (max + HEADROOM * span).max(FIXED_MIN + MIN_SPAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perceptron::Label;

    #[test]
    fn empty_examples_use_default_frame() {
        let bounds = AxisBounds::from_examples(&[]);
        assert_eq!(bounds.x_min, -2.0);
        assert_eq!(bounds.y_min, -2.0);
        assert!((bounds.x_max - 4.05).abs() < 1e-12);
        assert!((bounds.y_max - 4.05).abs() < 1e-12);
    }

    #[test]
    fn large_coordinates_raise_each_axis_independently() {
        let examples = [Example::new("A", 8.0, 1.0, Label::Positive)];
        let bounds = AxisBounds::from_examples(&examples);
        assert!((bounds.x_max - 9.0).abs() < 1e-12);
        assert!((bounds.y_max - 4.05).abs() < 1e-12);
    }

    #[test]
    fn contains_tolerates_edge_noise() {
        let bounds = AxisBounds::default();
        assert!(bounds.contains(DataPoint::new(-2.0 - 1e-10, 0.0)));
        assert!(!bounds.contains(DataPoint::new(-2.1, 0.0)));
    }
}
