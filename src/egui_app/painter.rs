//! Paints a rendered scene with egui shapes.

use egui::{
    Color32, FontId, Painter, Pos2, Rect, Shape, StrokeKind, Vec2,
    epaint::{QuadraticBezierShape, TextShape},
};

use crate::geometry::ScreenPoint;
use crate::layout::ASCENT_EM;
use crate::render::{Primitive, Rgba, Stroke, TextAnchor, TextRun};
use crate::transition::{Arrow, ArrowPath};

/// Horizontal smear used to fake a bold weight with the default font.
const BOLD_OFFSET: f32 = 0.6;

/// Paint `primitives` in order with the scene origin at `origin`.
pub fn paint(painter: &Painter, origin: Pos2, primitives: &[Primitive]) {
    for primitive in primitives {
        match primitive {
            Primitive::Text(run) => paint_text(painter, origin, run),
            other => painter.extend(shapes(origin, other)),
        }
    }
}

/// egui shapes for every primitive except text, which needs the font system.
pub fn shapes(origin: Pos2, primitive: &Primitive) -> Vec<Shape> {
    match primitive {
        Primitive::Polygon { points, fill } => vec![Shape::convex_polygon(
            points.iter().map(|point| to_pos(origin, *point)).collect(),
            color(*fill),
            egui::Stroke::NONE,
        )],
        Primitive::Line { from, to, stroke } => vec![Shape::line_segment(
            [to_pos(origin, *from), to_pos(origin, *to)],
            to_stroke(*stroke),
        )],
        Primitive::Rect { rect, stroke } => vec![Shape::rect_stroke(
            Rect::from_min_size(
                to_pos(origin, ScreenPoint::new(rect.x, rect.y)),
                Vec2::new(rect.width as f32, rect.height as f32),
            ),
            0.0,
            to_stroke(*stroke),
            StrokeKind::Inside,
        )],
        Primitive::Circle {
            center,
            radius,
            fill,
        } => vec![Shape::circle_filled(
            to_pos(origin, *center),
            *radius as f32,
            color(*fill),
        )],
        Primitive::Arrow { arrow, stroke } => arrow_shapes(origin, arrow, *stroke),
        Primitive::Text(_) => Vec::new(),
    }
}

fn arrow_shapes(origin: Pos2, arrow: &Arrow, stroke: Stroke) -> Vec<Shape> {
    let start = to_pos(origin, arrow.start);
    let end = to_pos(origin, arrow.end);
    let body = match arrow.path {
        ArrowPath::Straight => Shape::line_segment([start, end], to_stroke(stroke)),
        ArrowPath::Curved { control } => QuadraticBezierShape::from_points_stroke(
            [start, to_pos(origin, control), end],
            false,
            Color32::TRANSPARENT,
            to_stroke(stroke),
        )
        .into(),
    };
    let head = Shape::convex_polygon(
        [arrow.head.tip, arrow.head.left, arrow.head.right]
            .into_iter()
            .map(|point| to_pos(origin, point))
            .collect(),
        color(stroke.color),
        egui::Stroke::NONE,
    );
    vec![body, head]
}

fn paint_text(painter: &Painter, origin: Pos2, run: &TextRun) {
    let text_color = color(run.color);
    let galley = painter.layout_no_wrap(
        run.text.clone(),
        FontId::proportional(run.font_size as f32),
        text_color,
    );
    let anchor = match run.anchor {
        TextAnchor::Start => 0.0,
        TextAnchor::Middle => 0.5,
        TextAnchor::End => 1.0,
    };
    // Offset from the baseline anchor to the galley's top-left corner, then
    // rotated about the anchor.
    let offset = Vec2::new(
        -galley.size().x * anchor,
        -(run.font_size * ASCENT_EM) as f32,
    );
    let angle = run.rotation.to_radians() as f32;
    let (sin, cos) = angle.sin_cos();
    let rotated = Vec2::new(offset.x * cos - offset.y * sin, offset.x * sin + offset.y * cos);
    let top_left = to_pos(origin, run.position) + rotated;

    if run.bold {
        let smear = Vec2::new(BOLD_OFFSET * cos, BOLD_OFFSET * sin);
        painter.add(TextShape::new(top_left + smear, galley.clone(), text_color).with_angle(angle));
    }
    painter.add(TextShape::new(top_left, galley, text_color).with_angle(angle));
}

pub fn color(rgba: Rgba) -> Color32 {
    let alpha = (rgba.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, alpha)
}

fn to_stroke(stroke: Stroke) -> egui::Stroke {
    egui::Stroke::new(stroke.width as f32, color(stroke.color))
}

fn to_pos(origin: Pos2, point: ScreenPoint) -> Pos2 {
    origin + Vec2::new(point.x as f32, point.y as f32)
}
