//! Half-plane and segment clipping against the visible bounds.

use tracing::debug;

use crate::perceptron::Model;

use super::{AxisBounds, DataPoint, Segment};

/// Polygon covering `w1·x + w2·y + c ≥ 0` inside `bounds`.
///
/// Returns `None` when fewer than three vertices survive the clip.
pub fn clip_half_plane(model: &Model, bounds: &AxisBounds) -> Option<Vec<DataPoint>> {
    let corners = bounds.corners();
    let value = |p: DataPoint| model.score_at(p.x, p.y);
    let mut polygon = Vec::with_capacity(corners.len() + 1);
    for (i, &start) in corners.iter().enumerate() {
        let end = corners[(i + 1) % corners.len()];
        let (f_start, f_end) = (value(start), value(end));
        let (start_in, end_in) = (f_start >= 0.0, f_end >= 0.0);
        if start_in != end_in {
            if let Some(crossing) = edge_crossing(start, end, f_start, f_end) {
                polygon.push(crossing);
            }
        }
        if end_in {
            polygon.push(end);
        }
    }
    if polygon.len() < 3 {
        debug!(?model, "Decision region does not intersect the plot");
        return None;
    }
    Some(polygon)
}

fn edge_crossing(a: DataPoint, b: DataPoint, f_a: f64, f_b: f64) -> Option<DataPoint> {
    let denom = f_a - f_b;
    if denom == 0.0 {
        return None;
    }
    let t = f_a / denom;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some(a.lerp(b, t))
}

/// Liang–Barsky clip of segment `a → b` to `bounds`.
pub fn clip_segment(a: DataPoint, b: DataPoint, bounds: &AxisBounds) -> Option<Segment> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let constraints = [
        (-dx, a.x - bounds.x_min),
        (dx, bounds.x_max - a.x),
        (-dy, a.y - bounds.y_min),
        (dy, bounds.y_max - a.y),
    ];
    for (p, q) in constraints {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some(Segment::new(
        DataPoint::new(a.x + t0 * dx, a.y + t0 * dy),
        DataPoint::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}

/// Visible part of the boundary `w1·x + w2·y + c = 0`, if any.
pub fn decision_line(model: &Model, bounds: &AxisBounds) -> Option<Segment> {
    let Model { w1, w2, c } = *model;
    let (a, b) = if w2 != 0.0 {
        let y_at = |x: f64| (-c - w1 * x) / w2;
        (
            DataPoint::new(bounds.x_min, y_at(bounds.x_min)),
            DataPoint::new(bounds.x_max, y_at(bounds.x_max)),
        )
    } else if w1 != 0.0 {
        let x = -c / w1;
        (
            DataPoint::new(x, bounds.y_min),
            DataPoint::new(x, bounds.y_max),
        )
    } else {
        debug!(?model, "Degenerate rule has no boundary line");
        return None;
    };
    let segment = clip_segment(a, b, bounds);
    if segment.is_none() {
        debug!(?model, "Boundary line lies outside the plot");
    }
    segment
}
