use crate::geometry::{PlotTransform, ScreenPoint};
use crate::layout::ScreenRect;

use super::primitive::{Primitive, Rgba, Stroke, TextAnchor, TextRun, palette};

const TARGET_TICKS: f64 = 6.0;
const TICK_FONT_SIZE: f64 = 11.0;
const TITLE_FONT_SIZE: f64 = 13.0;

/// Tick spacing of 1, 2 or 5 × 10ⁿ giving roughly `target` ticks.
pub fn nice_step(min: f64, max: f64, target: f64) -> f64 {
    let span = (max - min).max(1e-9);
    let raw = span / target;
    let pow10 = 10f64.powf(raw.log10().floor());
    let ratio = raw / pow10;
    let mult = if ratio >= 5.0 {
        5.0
    } else if ratio >= 2.0 {
        2.0
    } else {
        1.0
    };
    mult * pow10
}

/// Tick label with at most three decimals and no trailing zeros.
pub fn format_tick(value: f64) -> String {
    if value.abs() < 1e-9 {
        return "0".to_string();
    }
    let fixed = format!("{value:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Tick positions in `[min, max]` on multiples of `step`.
pub fn ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last)
        .map(|k| k as f64 * step)
        .filter(|v| *v <= max + 1e-9)
        .collect()
}

pub(super) fn axes(transform: &PlotTransform) -> Vec<Primitive> {
    let bounds = transform.bounds;
    let viewport = transform.viewport;
    let x_ticks = ticks(
        bounds.x_min,
        bounds.x_max,
        nice_step(bounds.x_min, bounds.x_max, TARGET_TICKS),
    );
    let y_ticks = ticks(
        bounds.y_min,
        bounds.y_max,
        nice_step(bounds.y_min, bounds.y_max, TARGET_TICKS),
    );
    let line = |from: ScreenPoint, to: ScreenPoint, color: Rgba, width: f64| Primitive::Line {
        from,
        to,
        stroke: Stroke::new(color, width),
    };
    let vertical = |x: f64| {
        (
            ScreenPoint::new(transform.sx(x), transform.sy(bounds.y_min)),
            ScreenPoint::new(transform.sx(x), transform.sy(bounds.y_max)),
        )
    };
    let horizontal = |y: f64| {
        (
            ScreenPoint::new(transform.sx(bounds.x_min), transform.sy(y)),
            ScreenPoint::new(transform.sx(bounds.x_max), transform.sy(y)),
        )
    };

    let mut out = Vec::new();
    for &x in &x_ticks {
        let (from, to) = vertical(x);
        out.push(line(from, to, palette::GRID, 1.0));
    }
    for &y in &y_ticks {
        let (from, to) = horizontal(y);
        out.push(line(from, to, palette::GRID, 1.0));
    }
    if bounds.y_min <= 0.0 && bounds.y_max >= 0.0 {
        let (from, to) = horizontal(0.0);
        out.push(line(from, to, palette::AXIS, 1.25));
    }
    if bounds.x_min <= 0.0 && bounds.x_max >= 0.0 {
        let (from, to) = vertical(0.0);
        out.push(line(from, to, palette::AXIS, 1.25));
    }
    out.push(Primitive::Rect {
        rect: ScreenRect::new(
            viewport.pad,
            viewport.pad,
            viewport.plot_width(),
            viewport.plot_height(),
        ),
        stroke: Stroke::new(palette::BORDER, 1.0),
    });

    let tick_label = |text: String, position: ScreenPoint, anchor: TextAnchor| {
        Primitive::Text(
            TextRun::new(text, position, TICK_FONT_SIZE, palette::TICK_TEXT).anchored(anchor),
        )
    };
    for &x in &x_ticks {
        out.push(tick_label(
            format_tick(x),
            ScreenPoint::new(transform.sx(x), viewport.height - viewport.pad + 16.0),
            TextAnchor::Middle,
        ));
    }
    for &y in &y_ticks {
        out.push(tick_label(
            format_tick(y),
            ScreenPoint::new(viewport.pad - 8.0, transform.sy(y) + 4.0),
            TextAnchor::End,
        ));
    }
    out.push(Primitive::Text(
        TextRun::new(
            "feat1",
            ScreenPoint::new(viewport.width / 2.0, viewport.height - 6.0),
            TITLE_FONT_SIZE,
            palette::TITLE_TEXT,
        )
        .bold(true)
        .anchored(TextAnchor::Middle),
    ));
    out.push(Primitive::Text(
        TextRun::new(
            "feat2",
            ScreenPoint::new(14.0, viewport.height / 2.0),
            TITLE_FONT_SIZE,
            palette::TITLE_TEXT,
        )
        .bold(true)
        .anchored(TextAnchor::Middle)
        .rotated(-90.0),
    ));
    out
}
