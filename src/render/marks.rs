use crate::geometry::{DataPoint, PlotTransform};
use crate::layout::{ScreenRect, id_font_size, place_id_label};
use crate::perceptron::{Example, Label, Model, point_error};

use super::primitive::{Primitive, Rgba, Stroke, TextRun, palette};

/// Pixels of square side per unit of absolute error.
pub const ERROR_SQUARE_SCALE: f64 = 40.0;

pub fn class_color(label: Label) -> Rgba {
    match label {
        Label::Positive => palette::POSITIVE,
        Label::Negative => palette::NEGATIVE,
    }
}

/// Square centred on the point whose area tracks the squared error.
pub(super) fn error_square(
    model: &Model,
    example: &Example,
    transform: &PlotTransform,
) -> Option<Primitive> {
    let side = ERROR_SQUARE_SCALE * point_error(model, example).error.abs();
    if side < 1.0 {
        return None;
    }
    let center = transform.to_screen(DataPoint::new(example.feat1, example.feat2));
    Some(Primitive::Rect {
        rect: ScreenRect::new(center.x - side / 2.0, center.y - side / 2.0, side, side),
        stroke: Stroke::new(class_color(example.label).with_alpha(0.6), 2.0),
    })
}

/// Dot plus ID label; the label avoids `avoid` when given.
pub(super) fn point(
    example: &Example,
    is_current: bool,
    transform: &PlotTransform,
    avoid: Option<&ScreenRect>,
) -> [Primitive; 2] {
    let center = transform.to_screen(DataPoint::new(example.feat1, example.feat2));
    let (radius, opacity) = if is_current { (8.0, 1.0) } else { (5.0, 0.65) };
    let dot = Primitive::Circle {
        center,
        radius,
        fill: class_color(example.label).with_alpha(opacity),
    };
    let label = place_id_label(center, example.id.clone(), is_current, avoid);
    let ink = palette::INK.with_alpha(if is_current { 1.0 } else { 0.75 });
    let text = Primitive::Text(
        TextRun::new(label.text, label.position, id_font_size(is_current), ink).bold(is_current),
    );
    [dot, text]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{AxisBounds, Viewport};

    fn transform() -> PlotTransform {
        PlotTransform::new(AxisBounds::default(), Viewport::DEFAULT)
    }

    #[test]
    fn error_square_side_follows_absolute_error() {
        // Score 0.6 against label -1: |error| = 1.6.
        let example = Example::new("RI", 2.0, 2.0, Label::Negative);
        let Some(Primitive::Rect { rect, stroke }) =
            error_square(&Model::DEFAULT, &example, &transform())
        else {
            panic!("expected square");
        };
        assert!((rect.width - 64.0).abs() < 1e-9);
        assert_eq!(rect.width, rect.height);
        assert_eq!(stroke.color.hex(), "#800080");
    }

    #[test]
    fn tiny_errors_draw_nothing() {
        // Score exactly 1 for a positive point.
        let example = Example::new("P", 1.0, 0.0, Label::Positive);
        let model = Model::new(0.5, 0.0, 0.5);
        assert!(error_square(&model, &example, &transform()).is_none());
    }

    #[test]
    fn current_point_is_larger_and_opaque() {
        let example = Example::new("RA", 0.0, 2.0, Label::Negative);
        let [dot, _] = point(&example, true, &transform(), None);
        let Primitive::Circle { radius, fill, .. } = dot else {
            panic!("expected circle");
        };
        assert_eq!(radius, 8.0);
        assert_eq!(fill.a, 1.0);
        let [dot, _] = point(&example, false, &transform(), None);
        assert!(matches!(dot, Primitive::Circle { radius, .. } if radius == 5.0));
    }
}
