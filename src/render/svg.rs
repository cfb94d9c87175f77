//! Standalone SVG document for a primitive list.

use std::fmt::Write;

use crate::geometry::{ScreenPoint, Viewport};
use crate::transition::{Arrow, ArrowPath};

use super::primitive::{Primitive, Rgba, Stroke, TextAnchor, TextRun};

pub fn to_svg(primitives: &[Primitive], viewport: Viewport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"##,
        w = num(viewport.width),
        h = num(viewport.height),
    );
    let _ = writeln!(
        out,
        r##"<rect x="0" y="0" width="{}" height="{}" fill="#ffffff"/>"##,
        num(viewport.width),
        num(viewport.height)
    );
    for primitive in primitives {
        write_primitive(&mut out, primitive);
    }
    out.push_str("</svg>\n");
    out
}

fn write_primitive(out: &mut String, primitive: &Primitive) {
    let _ = match primitive {
        Primitive::Polygon { points, fill } => writeln!(
            out,
            r##"<polygon points="{}" fill="{}"{} stroke="none"/>"##,
            point_list(points),
            fill.hex(),
            opacity_attr("fill-opacity", fill)
        ),
        Primitive::Line { from, to, stroke } => writeln!(
            out,
            r##"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"##,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            stroke_attrs(stroke)
        ),
        Primitive::Rect { rect, stroke } => writeln!(
            out,
            r##"<rect x="{}" y="{}" width="{}" height="{}" fill="none"{}/>"##,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            stroke_attrs(stroke)
        ),
        Primitive::Circle {
            center,
            radius,
            fill,
        } => writeln!(
            out,
            r##"<circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"##,
            num(center.x),
            num(center.y),
            num(*radius),
            fill.hex(),
            opacity_attr("opacity", fill)
        ),
        Primitive::Text(run) => write_text(out, run),
        Primitive::Arrow { arrow, stroke } => write_arrow(out, arrow, stroke),
    };
}

fn write_text(out: &mut String, run: &TextRun) -> std::fmt::Result {
    let anchor = match run.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let weight = if run.bold { 700 } else { 400 };
    let transform = if run.rotation != 0.0 {
        format!(
            r##" transform="rotate({} {} {})""##,
            num(run.rotation),
            num(run.position.x),
            num(run.position.y)
        )
    } else {
        String::new()
    };
    writeln!(
        out,
        r##"<text x="{}" y="{}" text-anchor="{anchor}" font-size="{}" font-weight="{weight}" fill="{}"{}{transform}>{}</text>"##,
        num(run.position.x),
        num(run.position.y),
        num(run.font_size),
        run.color.hex(),
        opacity_attr("opacity", &run.color),
        escape(&run.text)
    )
}

fn write_arrow(out: &mut String, arrow: &Arrow, stroke: &Stroke) -> std::fmt::Result {
    match arrow.path {
        ArrowPath::Straight => writeln!(
            out,
            r##"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"##,
            num(arrow.start.x),
            num(arrow.start.y),
            num(arrow.end.x),
            num(arrow.end.y),
            stroke_attrs(stroke)
        )?,
        ArrowPath::Curved { control } => writeln!(
            out,
            r##"<path d="M {} {} Q {} {} {} {}" fill="none"{}/>"##,
            num(arrow.start.x),
            num(arrow.start.y),
            num(control.x),
            num(control.y),
            num(arrow.end.x),
            num(arrow.end.y),
            stroke_attrs(stroke)
        )?,
    }
    writeln!(
        out,
        r##"<polygon points="{}" fill="{}"/>"##,
        point_list(&[arrow.head.tip, arrow.head.left, arrow.head.right]),
        stroke.color.hex()
    )
}

fn stroke_attrs(stroke: &Stroke) -> String {
    format!(
        r##" stroke="{}" stroke-width="{}"{}"##,
        stroke.color.hex(),
        num(stroke.width),
        opacity_attr("stroke-opacity", &stroke.color)
    )
}

fn opacity_attr(name: &str, color: &Rgba) -> String {
    if color.a >= 1.0 {
        String::new()
    } else {
        format!(r##" {name}="{}""##, num(color.a))
    }
}

fn point_list(points: &[ScreenPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two decimals, trailing zeros dropped.
fn num(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ScreenRect;
    use crate::render::palette;

    #[test]
    fn document_has_root_and_background() {
        let svg = to_svg(&[], Viewport::DEFAULT);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r##"width="600" height="400""##));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn primitives_serialize_with_colours_and_opacity() {
        let primitives = vec![
            Primitive::Polygon {
                points: vec![
                    ScreenPoint::new(0.0, 0.0),
                    ScreenPoint::new(10.0, 0.0),
                    ScreenPoint::new(10.0, 10.5),
                ],
                fill: palette::REGION,
            },
            Primitive::Rect {
                rect: ScreenRect::new(40.0, 40.0, 520.0, 320.0),
                stroke: Stroke::new(palette::BORDER, 1.0),
            },
            Primitive::Text(TextRun::new(
                "a < b",
                ScreenPoint::new(1.0, 2.0),
                11.0,
                palette::INK,
            )),
        ];
        let svg = to_svg(&primitives, Viewport::DEFAULT);
        assert!(svg.contains(r##"points="0,0 10,0 10,10.5" fill="#ffa500" fill-opacity="0.25""##));
        assert!(svg.contains(r##"stroke="#bbbbbb" stroke-width="1""##));
        assert!(svg.contains("a &lt; b"));
    }

    #[test]
    fn rotated_text_carries_transform() {
        let run = TextRun::new("feat2", ScreenPoint::new(14.0, 200.0), 13.0, palette::INK).rotated(-90.0);
        let svg = to_svg(&[Primitive::Text(run)], Viewport::DEFAULT);
        assert!(svg.contains(r##"transform="rotate(-90 14 200)""##));
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(40.0), "40");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(12.3456), "12.35");
    }
}
