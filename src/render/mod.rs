//! Pure scene construction: session state in, ordered drawing primitives out.
//!
//! Nothing here touches a UI toolkit. The egui shell and the SVG writer both
//! consume the same [`Primitive`] list.

mod axes;
mod marks;
mod primitive;
pub mod svg;

pub use axes::{format_tick, nice_step, ticks};
pub use marks::{ERROR_SQUARE_SCALE, class_color};
pub use primitive::{Primitive, Rgba, Stroke, TextAnchor, TextRun, palette};

use crate::geometry::{
    AxisBounds, PlotTransform, Segment, Viewport, clip_half_plane, decision_line,
};
use crate::layout::{AnchorStrategy, LabelPlacement, place_equation_label, resolve_overlap};
use crate::perceptron::rule_text;
use crate::session::{DisplayOptions, TrainingSession};
use crate::transition::transition_arrows;

/// Render with the session's own display toggles.
pub fn render(session: &TrainingSession, viewport: Viewport) -> Vec<Primitive> {
    render_with(session, viewport, session.display())
}

/// Render with explicit display toggles, leaving the session untouched.
pub fn render_with(
    session: &TrainingSession,
    viewport: Viewport,
    display: DisplayOptions,
) -> Vec<Primitive> {
    let examples = session.examples();
    let transform = PlotTransform::new(AxisBounds::from_examples(examples), viewport);
    let model = session.model();
    let mut out = Vec::new();

    if let Some(region) = clip_half_plane(&model, &transform.bounds) {
        out.push(Primitive::Polygon {
            points: region.into_iter().map(|p| transform.to_screen(p)).collect(),
            fill: palette::REGION,
        });
    }
    out.extend(axes::axes(&transform));

    let previous = session
        .active_previous_model()
        .and_then(|old| decision_line(&old, &transform.bounds).map(|segment| (old, segment)));
    let mut old_label = previous.map(|(old, segment)| {
        out.push(boundary_line(&segment, &transform, 2.0, 0.25));
        place_equation_label(
            &segment,
            rule_text::equation_label(&old),
            AnchorStrategy::RightExit,
            &transform,
        )
    });
    let old_label_slot = old_label.as_ref().map(|_| out.len());

    let current_segment = decision_line(&model, &transform.bounds);
    let new_label = current_segment.map(|segment| {
        out.push(boundary_line(&segment, &transform, 3.0, 1.0));
        place_equation_label(
            &segment,
            rule_text::equation_label(&model),
            AnchorStrategy::YIntercept,
            &transform,
        )
    });

    if let (Some(old), Some(new)) = (old_label.as_mut(), new_label.as_ref()) {
        resolve_overlap(old, new);
    }
    // The old label sits right after its line even though it is placed last.
    if let (Some(slot), Some(label)) = (old_label_slot, old_label) {
        out.insert(slot, equation_text(label, false));
    }
    if let Some(label) = &new_label {
        out.push(equation_text(label.clone(), true));
    }

    if let (Some((old, old_segment)), Some(_)) = (previous, current_segment) {
        let transition = transition_arrows(&old, &model, &old_segment, &transform);
        out.extend(transition.arrows.into_iter().map(|arrow| Primitive::Arrow {
            arrow,
            stroke: Stroke::new(palette::ARROW, 2.0),
        }));
    }

    let shown: Vec<(usize, bool)> = if display.show_all_cases {
        (0..examples.len()).map(|i| (i, false)).collect()
    } else if session.current_example().is_some() {
        vec![(session.current_index(), true)]
    } else {
        Vec::new()
    };
    if display.show_error {
        out.extend(
            shown
                .iter()
                .filter_map(|&(i, _)| marks::error_square(&model, &examples[i], &transform)),
        );
    }
    let avoid = new_label.as_ref().map(|label| label.bbox);
    for &(i, is_current) in &shown {
        out.extend(marks::point(&examples[i], is_current, &transform, avoid.as_ref()));
    }
    out
}

fn boundary_line(
    segment: &Segment,
    transform: &PlotTransform,
    width: f64,
    opacity: f64,
) -> Primitive {
    Primitive::Line {
        from: transform.to_screen(segment.start),
        to: transform.to_screen(segment.end),
        stroke: Stroke::new(palette::BOUNDARY.with_alpha(opacity), width),
    }
}

fn equation_text(label: LabelPlacement, is_new: bool) -> Primitive {
    let opacity = if is_new { 1.0 } else { 0.35 };
    Primitive::Text(
        TextRun::new(label.text, label.position, label.font_size, palette::INK.with_alpha(opacity))
            .bold(is_new),
    )
}
