use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::geometry::Viewport;
use crate::perceptron::Model;
use crate::render::{self, Primitive};
use crate::session::{
    Accepted, InteractionState, JudgeOutcome, StateError, TrainingSession, Verdict,
};
use crate::settings::{AppSettings, MAX_LEARNING_RATE, MIN_LEARNING_RATE};

use super::state::{Alert, UiState};

/// Bridges button presses in the egui shell to the training session.
pub struct TrainerController {
    pub ui: UiState,
    session: TrainingSession,
    dataset_name: String,
    viewport: Viewport,
    session_path: Option<PathBuf>,
}

impl TrainerController {
    /// Build a session for `dataset`, layering a saved state on top.
    ///
    /// Progress from the saved state is kept only when it was recorded against
    /// the same dataset; otherwise the rule and toggles carry over and progress
    /// restarts.
    pub fn new(settings: &AppSettings, dataset: Dataset, saved: Option<InteractionState>) -> Self {
        let mut session = TrainingSession::new(settings.default_model(), settings.learning_rate);
        let display = session.display_mut();
        display.show_all_cases = settings.display.show_all_cases;
        display.show_error = settings.display.show_error;

        let selection = dataset.selection();
        let same_dataset = saved
            .as_ref()
            .is_some_and(|state| state.current_dataset_name.as_deref() == Some(dataset.name.as_str()));
        if let Some(state) = &saved {
            session.restore(state);
        }
        if same_dataset {
            session.load_examples(dataset.examples);
        } else {
            session.switch_table(dataset.examples);
        }
        session.set_selection(selection);
        let learning_rate = session.learning_rate();
        session.set_learning_rate(clamp_learning_rate(learning_rate));

        let ui = UiState {
            status: format!("{} examples loaded", session.examples().len()),
            ..UiState::default()
        };
        Self {
            ui,
            session,
            dataset_name: dataset.name,
            viewport: settings.viewport(),
            session_path: None,
        }
    }

    /// Save the session to `path` whenever [`TrainerController::save_session`] runs.
    pub fn with_session_path(mut self, path: PathBuf) -> Self {
        self.session_path = Some(path);
        self
    }

    pub fn session(&self) -> &TrainingSession {
        &self.session
    }

    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene(&self) -> Vec<Primitive> {
        render::render(&self.session, self.viewport)
    }

    pub fn judge(&mut self, verdict: Verdict) {
        let outcome = self.session.judge(verdict);
        self.apply_outcome(outcome);
    }

    pub fn acknowledge(&mut self) {
        let outcome = self.session.acknowledge();
        self.apply_outcome(outcome);
    }

    pub fn reset(&mut self) {
        self.session.reset_model();
        self.ui.clear_feedback();
        self.ui.evaluation = None;
        self.ui.status = "Rule reset to defaults".to_string();
    }

    pub fn evaluate(&mut self) {
        let evaluation = self.session.evaluate();
        self.ui.status = format!(
            "Accuracy {:.0}% on {} examples",
            evaluation.accuracy * 100.0,
            evaluation.count
        );
        self.ui.evaluation = Some(evaluation);
    }

    /// Slider edit of the rule coefficients.
    pub fn set_model(&mut self, model: Model) {
        if model == self.session.model() {
            return;
        }
        self.session.apply_model(model);
        self.ui.evaluation = None;
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.session.set_learning_rate(clamp_learning_rate(learning_rate));
    }

    pub fn set_show_all_cases(&mut self, show: bool) {
        self.session.display_mut().show_all_cases = show;
    }

    pub fn set_show_error(&mut self, show: bool) {
        self.session.display_mut().show_error = show;
    }

    /// Write the current state to the session file, if one is configured.
    pub fn save_session(&self) -> Result<(), StateError> {
        let Some(path) = &self.session_path else {
            return Ok(());
        };
        self.session.export_state().save(path)?;
        info!(path = %path.display(), "Saved session");
        Ok(())
    }

    fn apply_outcome(&mut self, outcome: JudgeOutcome) {
        match outcome {
            JudgeOutcome::Accepted(Accepted::Updated(report)) => {
                self.ui.alert = None;
                self.ui.evaluation = None;
                self.ui.status = "Rule improved. Confirm it to continue.".to_string();
                self.ui.report = Some(report);
            }
            JudgeOutcome::Accepted(Accepted::Advanced { wrapped }) => {
                self.ui.clear_feedback();
                self.ui.status = if wrapped {
                    format!("Epoch {} started", self.session.epoch())
                } else {
                    format!(
                        "Point {} of {}",
                        self.session.current_index() + 1,
                        self.session.examples().len()
                    )
                };
            }
            JudgeOutcome::Rejected(reason) => {
                self.ui.alert = Some(Alert::warning(reason.message()));
            }
            JudgeOutcome::Idle => {
                self.ui.alert = Some(Alert::info("No examples loaded."));
            }
        }
    }
}

/// Read a saved session; a missing or unreadable file yields `None`.
pub fn read_saved_state(path: &Path) -> Option<InteractionState> {
    if !path.exists() {
        return None;
    }
    match InteractionState::load(path) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!(path = %path.display(), "Ignoring saved session: {err}");
            None
        }
    }
}

fn clamp_learning_rate(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(MIN_LEARNING_RATE, MAX_LEARNING_RATE)
    } else {
        crate::session::DEFAULT_LEARNING_RATE
    }
}
