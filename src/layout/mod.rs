//! Placement of equation labels and point ID labels.
//!
//! All placement works on estimated text boxes (see [`measure`]) so layout is
//! deterministic and independent of any font engine.

mod text;

pub use text::{ADVANCE_EM, ASCENT_EM, DESCENT_EM, ScreenRect, measure};

use crate::geometry::{AxisBounds, DataPoint, PlotTransform, ScreenPoint, Segment};

/// Font size of boundary equation labels.
pub const EQUATION_FONT_SIZE: f64 = 15.0;
const LABEL_NORMAL_OFFSET: f64 = 14.0;
const CLAMP_INSET_X: f64 = 6.0;
const CLAMP_INSET_TOP: f64 = 14.0;
const CLAMP_INSET_BOTTOM: f64 = 6.0;
const OVERLAP_NUDGE: f64 = 14.0;
const OVERLAP_RETRIES: usize = 6;
const AXIS_EPS: f64 = 1e-12;

/// Where along a boundary its equation label is anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorStrategy {
    /// Crossing of `x = 0`, then the left edge.
    YIntercept,
    /// Right edge, then the top edge, then the bottom edge.
    RightExit,
}

/// A placed text run: baseline start plus its estimated box.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlacement {
    pub text: String,
    pub font_size: f64,
    pub position: ScreenPoint,
    pub bbox: ScreenRect,
}

impl LabelPlacement {
    fn new(text: String, font_size: f64, position: ScreenPoint) -> Self {
        let bbox = measure(&text, font_size, position);
        Self {
            text,
            font_size,
            position,
            bbox,
        }
    }

    fn moved_to(&mut self, position: ScreenPoint) {
        self.position = position;
        self.bbox = measure(&self.text, self.font_size, position);
    }
}

/// Pick the data-space anchor for a label on `segment`, falling back to its midpoint.
pub fn choose_anchor(segment: &Segment, bounds: &AxisBounds, strategy: AnchorStrategy) -> DataPoint {
    let at_x = |x: f64| y_at_x(segment, x).map(|y| DataPoint::new(x, y));
    let at_y = |y: f64| x_at_y(segment, y).map(|x| DataPoint::new(x, y));
    let candidates = match strategy {
        AnchorStrategy::YIntercept => [at_x(0.0), at_x(bounds.x_min), None],
        AnchorStrategy::RightExit => [at_x(bounds.x_max), at_y(bounds.y_max), at_y(bounds.y_min)],
    };
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| bounds.contains(*candidate))
        .unwrap_or_else(|| segment.midpoint())
}

fn y_at_x(segment: &Segment, x: f64) -> Option<f64> {
    let dx = segment.end.x - segment.start.x;
    if dx.abs() < AXIS_EPS {
        return None;
    }
    let t = (x - segment.start.x) / dx;
    Some(segment.start.y + t * (segment.end.y - segment.start.y))
}

fn x_at_y(segment: &Segment, y: f64) -> Option<f64> {
    let dy = segment.end.y - segment.start.y;
    if dy.abs() < AXIS_EPS {
        return None;
    }
    let t = (y - segment.start.y) / dy;
    Some(segment.start.x + t * (segment.end.x - segment.start.x))
}

/// Anchor, offset along the screen normal, then clamp the whole box inside the padding.
pub fn place_equation_label(
    segment: &Segment,
    text: String,
    strategy: AnchorStrategy,
    transform: &PlotTransform,
) -> LabelPlacement {
    let anchor = transform.to_screen(choose_anchor(segment, &transform.bounds, strategy));
    let start = transform.to_screen(segment.start);
    let end = transform.to_screen(segment.end);
    let (vx, vy) = (end.x - start.x, end.y - start.y);
    let len = match vx.hypot(vy) {
        len if len > 0.0 => len,
        _ => 1.0,
    };
    let (nx, ny) = (-vy / len, vx / len);

    let viewport = transform.viewport;
    let min_x = viewport.pad + CLAMP_INSET_X;
    let max_x = viewport.width - viewport.pad - CLAMP_INSET_X;
    let min_y = viewport.pad + CLAMP_INSET_TOP;
    let max_y = viewport.height - viewport.pad - CLAMP_INSET_BOTTOM;

    let x = (anchor.x + nx * LABEL_NORMAL_OFFSET).max(min_x).min(max_x);
    let y = (anchor.y + ny * LABEL_NORMAL_OFFSET).max(min_y).min(max_y);
    let mut label = LabelPlacement::new(text, EQUATION_FONT_SIZE, ScreenPoint::new(x, y));

    let bbox = label.bbox;
    let dx = shift_into(bbox.x, bbox.right(), min_x, max_x);
    let dy = shift_into(bbox.y, bbox.bottom(), min_y, max_y);
    if dx != 0.0 || dy != 0.0 {
        label.moved_to(label.position.offset(dx, dy));
    }
    label
}

/// Minimal shift bringing `[low, high]` inside `[min, max]`; the far edge wins when both overflow.
fn shift_into(low: f64, high: f64, min: f64, max: f64) -> f64 {
    if high > max {
        max - high
    } else if low < min {
        min - low
    } else {
        0.0
    }
}

/// Push the old label down until it clears the new one or the retries run out.
pub fn resolve_overlap(old: &mut LabelPlacement, new: &LabelPlacement) {
    for _ in 0..OVERLAP_RETRIES {
        if !old.bbox.intersects(&new.bbox) {
            break;
        }
        let nudged = old.position.offset(0.0, OVERLAP_NUDGE);
        old.moved_to(nudged);
    }
}

/// Place a point's ID label, steering clear of `avoid` when given.
pub fn place_id_label(
    point: ScreenPoint,
    text: String,
    is_current: bool,
    avoid: Option<&ScreenRect>,
) -> LabelPlacement {
    let font_size = id_font_size(is_current);
    let default_offset = if is_current { 10.0 } else { 8.0 };
    let mut label = LabelPlacement::new(
        text,
        font_size,
        point.offset(default_offset, -default_offset),
    );
    let Some(avoid) = avoid else {
        return label;
    };
    let k = if is_current { 12.0 } else { 10.0 };
    let candidates = [
        (k, -k),
        (k, k),
        (-k, -k),
        (-k, k),
        (2.0 * k, 0.0),
        (-2.0 * k, 0.0),
    ];
    for (dx, dy) in candidates {
        label.moved_to(point.offset(dx, dy));
        if !label.bbox.intersects(avoid) {
            break;
        }
    }
    label
}

pub fn id_font_size(is_current: bool) -> f64 {
    if is_current { 13.0 } else { 11.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Viewport, decision_line};
    use crate::perceptron::Model;

    fn transform() -> PlotTransform {
        PlotTransform::new(AxisBounds::default(), Viewport::DEFAULT)
    }

    #[test]
    fn y_intercept_prefers_crossing_at_zero() {
        let t = transform();
        let segment = decision_line(&Model::DEFAULT, &t.bounds).unwrap();
        let anchor = choose_anchor(&segment, &t.bounds, AnchorStrategy::YIntercept);
        assert_eq!(anchor.x, 0.0);
        assert!((anchor.y - 1.5).abs() < 1e-9);
    }

    #[test]
    fn vertical_segment_falls_back_to_midpoint() {
        let t = transform();
        let segment = decision_line(&Model::new(1.0, 0.0, -1.0), &t.bounds).unwrap();
        let anchor = choose_anchor(&segment, &t.bounds, AnchorStrategy::YIntercept);
        assert_eq!(anchor, segment.midpoint());
    }

    #[test]
    fn right_exit_uses_top_edge_for_steep_lines() {
        let t = transform();
        // y = 3x leaves through the top edge well before the right edge.
        let segment = decision_line(&Model::new(3.0, -1.0, 0.0), &t.bounds).unwrap();
        let anchor = choose_anchor(&segment, &t.bounds, AnchorStrategy::RightExit);
        assert!((anchor.y - t.bounds.y_max).abs() < 1e-9);
        assert!((anchor.x - t.bounds.y_max / 3.0).abs() < 1e-9);
    }

    #[test]
    fn y_intercept_falls_back_to_left_edge() {
        let t = transform();
        // y = 2x + 5 crosses x = 0 above the plot but enters through the left edge.
        let segment = decision_line(&Model::new(2.0, -1.0, 5.0), &t.bounds).unwrap();
        let anchor = choose_anchor(&segment, &t.bounds, AnchorStrategy::YIntercept);
        assert!((anchor.x - t.bounds.x_min).abs() < 1e-9);
        assert!((anchor.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn right_exit_falls_back_to_bottom_edge() {
        let t = transform();
        // y = -3x - 3 misses the right and top edges and leaves through the bottom.
        let segment = decision_line(&Model::new(3.0, 1.0, 3.0), &t.bounds).unwrap();
        let anchor = choose_anchor(&segment, &t.bounds, AnchorStrategy::RightExit);
        assert!((anchor.y - t.bounds.y_min).abs() < 1e-9);
        assert!((anchor.x + 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn equation_label_box_stays_inside_padding() {
        let t = transform();
        for model in [
            Model::DEFAULT,
            Model::new(1.0, 0.0, -3.9),
            Model::new(0.0, 1.0, 1.95),
            Model::new(-1.0, -1.0, 7.0),
        ] {
            let Some(segment) = decision_line(&model, &t.bounds) else {
                continue;
            };
            let label = place_equation_label(
                &segment,
                crate::perceptron::rule_text::equation_label(&model),
                AnchorStrategy::RightExit,
                &t,
            );
            assert!(label.bbox.x >= 46.0 - 1e-9, "{label:?}");
            assert!(label.bbox.right() <= 554.0 + 1e-9, "{label:?}");
            assert!(label.bbox.y >= 54.0 - 1e-9, "{label:?}");
            assert!(label.bbox.bottom() <= 354.0 + 1e-9, "{label:?}");
        }
    }

    #[test]
    fn overlapping_old_label_moves_down_in_steps() {
        let new = LabelPlacement::new("new".into(), 15.0, ScreenPoint::new(100.0, 100.0));
        let mut old = LabelPlacement::new("old".into(), 15.0, ScreenPoint::new(110.0, 100.0));
        resolve_overlap(&mut old, &new);
        assert!(!old.bbox.intersects(&new.bbox));
        let steps = (old.position.y - 100.0) / OVERLAP_NUDGE;
        assert!((steps - steps.round()).abs() < 1e-9);
        assert_eq!(steps.round(), 2.0);
    }

    #[test]
    fn overlap_retries_are_bounded() {
        let huge = LabelPlacement {
            text: "x".into(),
            font_size: 15.0,
            position: ScreenPoint::new(0.0, 0.0),
            bbox: ScreenRect::new(0.0, 0.0, 1000.0, 1000.0),
        };
        let mut old = LabelPlacement::new("old".into(), 15.0, ScreenPoint::new(10.0, 50.0));
        resolve_overlap(&mut old, &huge);
        assert!((old.position.y - (50.0 + 6.0 * OVERLAP_NUDGE)).abs() < 1e-9);
    }

    #[test]
    fn id_label_uses_default_offset_without_obstacle() {
        let label = place_id_label(ScreenPoint::new(100.0, 100.0), "RA".into(), true, None);
        assert_eq!(label.position, ScreenPoint::new(110.0, 90.0));
        assert_eq!(label.font_size, 13.0);
    }

    #[test]
    fn id_label_skips_candidates_hitting_the_obstacle() {
        let point = ScreenPoint::new(100.0, 100.0);
        // Covers everything above the point.
        let avoid = ScreenRect::new(0.0, 0.0, 300.0, 99.0);
        let label = place_id_label(point, "RA".into(), false, Some(&avoid));
        assert_eq!(label.position, ScreenPoint::new(110.0, 110.0));
        assert!(!label.bbox.intersects(&avoid));
    }

    #[test]
    fn id_label_keeps_last_candidate_when_all_collide() {
        let point = ScreenPoint::new(100.0, 100.0);
        let avoid = ScreenRect::new(0.0, 0.0, 400.0, 400.0);
        let label = place_id_label(point, "RA".into(), true, Some(&avoid));
        assert_eq!(label.position, ScreenPoint::new(76.0, 100.0));
    }
}
