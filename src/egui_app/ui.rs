//! egui layout for the trainer window.

use eframe::egui::{
    self, Align, Button, Color32, Frame, Layout, Margin, RichText, ScrollArea, Sense, Slider, Ui,
    Vec2,
};
use tracing::warn;

use crate::perceptron::{Label, rule_text};
use crate::session::Verdict;
use crate::settings::{MAX_LEARNING_RATE, MIN_LEARNING_RATE};

use super::controller::TrainerController;
use super::painter;
use super::state::AlertTone;
use super::style;

/// Smallest window that still fits the controls and a default plot.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(900.0, 560.0);
const WEIGHT_RANGE: std::ops::RangeInclusive<f64> = -3.0..=3.0;
const CONTROLS_WIDTH: f32 = 260.0;

pub struct TrainerApp {
    controller: TrainerController,
    visuals_set: bool,
}

impl TrainerApp {
    pub fn new(controller: TrainerController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::light();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        ui.heading(self.controller.dataset_name().to_string());
        ui.add_space(6.0);

        let current = self.controller.session().model();
        let mut model = current;
        ui.label(RichText::new("Rule").strong());
        ui.add(Slider::new(&mut model.w1, WEIGHT_RANGE).text("w1").fixed_decimals(2));
        ui.add(Slider::new(&mut model.w2, WEIGHT_RANGE).text("w2").fixed_decimals(2));
        ui.add(Slider::new(&mut model.c, WEIGHT_RANGE).text("c").fixed_decimals(2));
        if model != current {
            self.controller.set_model(model);
        }

        let mut learning_rate = self.controller.session().learning_rate();
        if ui
            .add(
                Slider::new(&mut learning_rate, MIN_LEARNING_RATE..=MAX_LEARNING_RATE)
                    .text("learning rate")
                    .fixed_decimals(2),
            )
            .changed()
        {
            self.controller.set_learning_rate(learning_rate);
        }

        ui.add_space(8.0);
        let display = self.controller.session().display();
        let mut show_all = display.show_all_cases;
        if ui.checkbox(&mut show_all, "Show all cases").changed() {
            self.controller.set_show_all_cases(show_all);
        }
        let mut show_error = display.show_error;
        if ui.checkbox(&mut show_error, "Show error squares").changed() {
            self.controller.set_show_error(show_error);
        }

        ui.add_space(8.0);
        ui.separator();
        self.render_actions(ui);
    }

    fn render_actions(&mut self, ui: &mut Ui) {
        let session = self.controller.session();
        let can_judge = session.can_judge();
        let awaiting = session.is_awaiting_ack();
        ui.label(RichText::new("Does the rule predict this point?").strong());
        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_judge, Button::new("Yes, it works"))
                .clicked()
            {
                self.controller.judge(Verdict::Correct);
            }
            if ui
                .add_enabled(can_judge, Button::new("No, it fails"))
                .clicked()
            {
                self.controller.judge(Verdict::Mistake);
            }
        });
        if ui
            .add_enabled(awaiting, Button::new("Accept improved rule"))
            .clicked()
        {
            self.controller.acknowledge();
        }
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Evaluate").clicked() {
                self.controller.evaluate();
            }
            if ui.button("Reset rule").clicked() {
                self.controller.reset();
            }
        });
    }

    fn render_point(&self, ui: &mut Ui) {
        let palette = style::palette();
        let Some(summary) = self.controller.session().current_summary() else {
            ui.label(RichText::new("No examples loaded.").color(palette.text_muted));
            return;
        };
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Point {}", summary.position)).strong());
            ui.label(RichText::new(format!("epoch {}", summary.epoch)).color(palette.text_muted));
        });
        ui.label(&summary.caption);
        let verdict_color = if summary.is_mistake {
            palette.warning
        } else {
            palette.success
        };
        ui.horizontal(|ui| {
            ui.label(format!("Rule predicts {}", label_word(summary.prediction)));
            ui.label(
                RichText::new(format!("truth is {}", label_word(summary.truth))).color(verdict_color),
            );
        });
        ui.label(
            RichText::new(rule_text::signed_rule(&self.controller.session().model()))
                .monospace()
                .color(palette.accent),
        );
    }

    fn render_feedback(&self, ui: &mut Ui) {
        let palette = style::palette();
        let state = &self.controller.ui;
        if let Some(alert) = &state.alert {
            let color = match alert.tone {
                AlertTone::Info => palette.text_muted,
                AlertTone::Warning => palette.warning,
            };
            ui.label(RichText::new(&alert.message).color(color).strong());
        }
        if let Some(evaluation) = &state.evaluation {
            ui.label(format!(
                "Accuracy {:.0}%  ·  mean squared error {:.3}  ·  {} points",
                evaluation.accuracy * 100.0,
                evaluation.mean_squared_error,
                evaluation.count
            ));
        }
        if let Some(report) = &state.report {
            egui::CollapsingHeader::new("How the rule changed")
                .default_open(true)
                .show(ui, |ui| {
                    for line in report.explanation_lines() {
                        ui.label(RichText::new(line).monospace());
                    }
                });
        }
    }

    fn render_plot(&self, ui: &mut Ui) {
        let viewport = self.controller.viewport();
        let size = Vec2::new(viewport.width as f32, viewport.height as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        painter.rect_filled(response.rect, 0.0, style::palette().plot_background);
        painter::paint(&painter, response.rect.min, &self.controller.scene());
    }

    fn render_status(&self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_tertiary)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    ui.label(RichText::new(&self.controller.ui.status).color(palette.text_muted));
                });
            });
    }
}

fn label_word(label: Label) -> &'static str {
    match label {
        Label::Positive => "positive",
        Label::Negative => "negative",
    }
}

impl eframe::App for TrainerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_status(ctx);
        egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(CONTROLS_WIDTH)
            .show(ctx, |ui| self.render_controls(ui));
        egui::CentralPanel::default()
            .frame(Frame::new().fill(Color32::from_gray(250)).inner_margin(Margin::same(12)))
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    self.render_point(ui);
                    ui.add_space(6.0);
                    self.render_plot(ui);
                    ui.add_space(6.0);
                    self.render_feedback(ui);
                });
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.controller.save_session() {
            warn!("Failed to save session: {err}");
        }
    }
}

