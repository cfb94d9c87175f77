use egui::{Color32, CornerRadius, Stroke, Visuals, epaint::Shadow, style::WidgetVisuals};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub plot_background: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub warning: Color32,
    pub success: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(246, 244, 240),
        bg_secondary: Color32::from_rgb(236, 233, 226),
        bg_tertiary: Color32::from_rgb(222, 218, 210),
        panel_outline: Color32::from_rgb(200, 195, 186),
        plot_background: Color32::WHITE,
        text_primary: Color32::from_rgb(34, 34, 34),
        text_muted: Color32::from_rgb(110, 110, 110),
        accent: Color32::from_rgb(0xd9, 0x77, 0x06),
        warning: Color32::from_rgb(180, 60, 40),
        success: Color32::from_rgb(60, 130, 80),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.warning;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.accent.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        set_flat(widget, palette);
    }
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.accent);
    visuals.window_corner_radius = CornerRadius::same(2);
    visuals.popup_shadow = Shadow::NONE;
}

fn set_flat(widget: &mut WidgetVisuals, palette: Palette) {
    widget.corner_radius = CornerRadius::same(2);
    widget.bg_fill = palette.bg_tertiary;
    widget.weak_bg_fill = palette.bg_tertiary;
    widget.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    widget.fg_stroke = Stroke::new(1.0, palette.text_primary);
}
