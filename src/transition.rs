//! Arrows from the superseded boundary to the updated one.

use crate::geometry::{DataPoint, PlotTransform, ScreenPoint, Segment};
use crate::perceptron::Model;

/// Fractions along the old boundary where arrows start.
pub const SAMPLE_FRACTIONS: [f64; 3] = [0.25, 0.5, 0.75];
/// Directions whose |cos| exceeds this are drawn with straight arrows.
pub const PARALLEL_THRESHOLD: f64 = 0.995;
const HEAD_LENGTH: f64 = 7.0;
const HEAD_HALF_WIDTH: f64 = 4.0;
const CURVE_BULGE: f64 = 0.25;

/// Filled triangle at the end of an arrow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrowhead {
    pub tip: ScreenPoint,
    pub left: ScreenPoint,
    pub right: ScreenPoint,
}

impl Arrowhead {
    /// Triangle at `tip` pointing along `(dx, dy)`.
    pub fn pointing(tip: ScreenPoint, dx: f64, dy: f64) -> Self {
        let (ux, uy) = unit(dx, dy);
        let base = tip.offset(-ux * HEAD_LENGTH, -uy * HEAD_LENGTH);
        let (px, py) = (-uy, ux);
        Self {
            tip,
            left: base.offset(px * HEAD_HALF_WIDTH, py * HEAD_HALF_WIDTH),
            right: base.offset(-px * HEAD_HALF_WIDTH, -py * HEAD_HALF_WIDTH),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArrowPath {
    Straight,
    /// Quadratic Bézier through `control`.
    Curved { control: ScreenPoint },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
    pub path: ArrowPath,
    pub head: Arrowhead,
}

impl Arrow {
    pub fn straight(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self {
            start,
            end,
            path: ArrowPath::Straight,
            head: Arrowhead::pointing(end, end.x - start.x, end.y - start.y),
        }
    }

    /// Curve bulging to the left of `start → end` for a positive sign.
    pub fn curved(start: ScreenPoint, end: ScreenPoint, curve_sign: f64) -> Self {
        let (vx, vy) = (end.x - start.x, end.y - start.y);
        let len = nonzero(vx.hypot(vy));
        let (nx, ny) = (-vy / len, vx / len);
        let bulge = CURVE_BULGE * len * curve_sign;
        let control = ScreenPoint::new(
            (start.x + end.x) / 2.0 + nx * bulge,
            (start.y + end.y) / 2.0 + ny * bulge,
        );
        Self {
            start,
            end,
            path: ArrowPath::Curved { control },
            head: Arrowhead::pointing(end, end.x - control.x, end.y - control.y),
        }
    }
}

/// How the update reads as a motion: shift or rotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub parallel: bool,
    pub curve_sign: f64,
    pub arrows: Vec<Arrow>,
}

/// Direction of the boundary line: the weight vector rotated a quarter turn.
pub fn direction(model: &Model) -> (f64, f64) {
    (model.w2, -model.w1)
}

/// Absolute cosine between the two boundary directions.
pub fn direction_similarity(old: &Model, new: &Model) -> f64 {
    let (ax, ay) = direction(old);
    let (bx, by) = direction(new);
    let a_len = nonzero(ax.hypot(ay));
    let b_len = nonzero(bx.hypot(by));
    ((ax * bx + ay * by) / (a_len * b_len)).abs()
}

pub fn is_parallel(old: &Model, new: &Model) -> bool {
    direction_similarity(old, new) > PARALLEL_THRESHOLD
}

/// `+1` when the boundary turned counter-clockwise (in data space), else `-1`.
pub fn curve_sign(old: &Model, new: &Model) -> f64 {
    let (ax, ay) = direction(old);
    let (bx, by) = direction(new);
    if ax * by - ay * bx >= 0.0 { 1.0 } else { -1.0 }
}

/// Orthogonal projection of `point` onto the boundary of `model`.
pub fn project_onto(model: &Model, point: DataPoint) -> DataPoint {
    let denom = model.w1 * model.w1 + model.w2 * model.w2;
    let denom = if denom == 0.0 { 1.0 } else { denom };
    let f = model.score_at(point.x, point.y);
    DataPoint::new(point.x - f * model.w1 / denom, point.y - f * model.w2 / denom)
}

/// Arrows from samples on the old boundary to their projections on the new one.
pub fn transition_arrows(
    old: &Model,
    new: &Model,
    old_segment: &Segment,
    transform: &PlotTransform,
) -> Transition {
    let parallel = is_parallel(old, new);
    let sign = curve_sign(old, new);
    let arrows = SAMPLE_FRACTIONS
        .iter()
        .map(|&t| {
            let from = old_segment.point_at(t);
            let to = project_onto(new, from);
            let (start, end) = (transform.to_screen(from), transform.to_screen(to));
            if parallel {
                Arrow::straight(start, end)
            } else {
                Arrow::curved(start, end, sign)
            }
        })
        .collect();
    Transition {
        parallel,
        curve_sign: sign,
        arrows,
    }
}

fn unit(dx: f64, dy: f64) -> (f64, f64) {
    let len = nonzero(dx.hypot(dy));
    (dx / len, dy / len)
}

fn nonzero(len: f64) -> f64 {
    if len == 0.0 { 1.0 } else { len }
}
