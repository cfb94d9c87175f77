//! Point-by-point training session driven by the learner's judgments.
//!
//! The session owns the rule, the ordered examples and the progress counters.
//! Every mutation happens through a method on [`TrainingSession`]; there is no
//! ambient state, so several sessions can coexist.

mod outcome;
mod state;

pub use outcome::{Accepted, JudgeOutcome, Rejection, UpdateReport, Verdict};
pub use state::{InteractionState, StateError};

use tracing::info;

use crate::perceptron::{self, Evaluation, Example, Label, Model};

/// Learning rate a new session starts with.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Where the session is in the judge / correct / acknowledge cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a judgment on the current example.
    #[default]
    Presenting,
    /// An update was applied; only acknowledgment moves on.
    AwaitingAck,
}

/// The rule that was just replaced, kept so the change can be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviousModel {
    pub model: Model,
    /// Drawn only while active; advancing deactivates it.
    pub active: bool,
}

/// Toggles that affect what a render shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Draw every example instead of only the current one.
    pub show_all_cases: bool,
    /// Overlay squared-error squares.
    pub show_error: bool,
}

/// Identifiers of the dataset and table the examples came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetSelection {
    pub dataset_name: Option<String>,
    pub collection_name: Option<String>,
}

/// Panel data for the current example.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSummary {
    pub caption: String,
    /// One-based position, e.g. `3 / 9`.
    pub position: String,
    pub epoch: u64,
    pub prediction: Label,
    pub truth: Label,
    pub is_mistake: bool,
}

#[derive(Clone, Debug)]
pub struct TrainingSession {
    model: Model,
    default_model: Model,
    learning_rate: f64,
    examples: Vec<Example>,
    current_index: usize,
    epoch: u64,
    phase: Phase,
    previous: Option<PreviousModel>,
    display: DisplayOptions,
    selection: DatasetSelection,
}

impl Default for TrainingSession {
    fn default() -> Self {
        Self::new(Model::DEFAULT, DEFAULT_LEARNING_RATE)
    }
}

impl TrainingSession {
    /// Create an empty session; `default_model` is what [`Self::reset_model`] restores.
    pub fn new(default_model: Model, learning_rate: f64) -> Self {
        Self {
            model: default_model,
            default_model,
            learning_rate,
            examples: Vec::new(),
            current_index: 0,
            epoch: 0,
            phase: Phase::Presenting,
            previous: None,
            display: DisplayOptions::default(),
            selection: DatasetSelection::default(),
        }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn default_model(&self) -> Model {
        self.default_model
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_awaiting_ack(&self) -> bool {
        self.phase == Phase::AwaitingAck
    }

    /// Judgments are possible only with a current example and no pending update.
    pub fn can_judge(&self) -> bool {
        self.phase == Phase::Presenting && self.current_example().is_some()
    }

    pub fn display(&self) -> DisplayOptions {
        self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayOptions {
        &mut self.display
    }

    pub fn selection(&self) -> &DatasetSelection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: DatasetSelection) {
        self.selection = selection;
    }

    /// Snapshot of the superseded rule, regardless of whether it is drawn.
    pub fn previous(&self) -> Option<PreviousModel> {
        self.previous
    }

    /// The superseded rule while its transition should be drawn.
    pub fn active_previous_model(&self) -> Option<Model> {
        self.previous
            .filter(|previous| previous.active)
            .map(|previous| previous.model)
    }

    pub fn current_example(&self) -> Option<&Example> {
        self.examples.get(self.current_index)
    }

    /// Replace the examples, keeping the index when it is still in range.
    ///
    /// Epoch and rule are untouched; any pending acknowledgment is dropped.
    pub fn load_examples(&mut self, examples: Vec<Example>) {
        self.examples = examples;
        self.clamp_index();
        self.phase = Phase::Presenting;
        info!(
            count = self.examples.len(),
            index = self.current_index,
            "Loaded examples"
        );
    }

    /// Replace the examples after a table switch, restarting progress.
    pub fn switch_table(&mut self, examples: Vec<Example>) {
        self.examples = examples;
        self.current_index = 0;
        self.epoch = 0;
        self.phase = Phase::Presenting;
        info!(count = self.examples.len(), "Switched table");
    }

    /// Drive the state machine with the learner's claim about the current example.
    pub fn judge(&mut self, verdict: Verdict) -> JudgeOutcome {
        let Some(example) = self.current_example() else {
            return JudgeOutcome::Idle;
        };
        if self.phase == Phase::AwaitingAck {
            return JudgeOutcome::Rejected(Rejection::AwaitingAcknowledgement);
        }
        let mistake = self.model.is_mistake(example);
        match (verdict, mistake) {
            (Verdict::Correct, false) => {
                let wrapped = self.step_forward();
                info!(index = self.current_index, epoch = self.epoch, "Rule confirmed");
                JudgeOutcome::Accepted(Accepted::Advanced { wrapped })
            }
            (Verdict::Correct, true) => {
                info!(index = self.current_index, "Rejected claim that rule works");
                JudgeOutcome::Rejected(Rejection::RuleActuallyFails)
            }
            (Verdict::Mistake, false) => {
                info!(index = self.current_index, "Rejected claim that rule fails");
                JudgeOutcome::Rejected(Rejection::RuleActuallyWorks)
            }
            (Verdict::Mistake, true) => {
                let example = example.clone();
                let report = self.apply_update(example);
                JudgeOutcome::Accepted(Accepted::Updated(report))
            }
        }
    }

    /// Confirm the improved rule and move on.
    pub fn acknowledge(&mut self) -> JudgeOutcome {
        if self.current_example().is_none() {
            return JudgeOutcome::Idle;
        }
        if self.phase != Phase::AwaitingAck {
            return JudgeOutcome::Rejected(Rejection::NothingToAcknowledge);
        }
        let wrapped = self.step_forward();
        JudgeOutcome::Accepted(Accepted::Advanced { wrapped })
    }

    /// Move to the next example, wrapping into a new epoch.
    ///
    /// No-op when empty or while an update waits for [`Self::acknowledge`].
    pub fn advance(&mut self) {
        if self.phase == Phase::AwaitingAck {
            return;
        }
        self.step_forward();
    }

    /// Restore the default rule and restart progress.
    pub fn reset_model(&mut self) {
        self.model = self.default_model;
        self.previous = None;
        self.current_index = 0;
        self.epoch = 0;
        self.phase = Phase::Presenting;
        info!("Model reset to defaults");
    }

    /// Set the rule directly (slider override), bypassing the update rule.
    pub fn apply_model(&mut self, model: Model) {
        self.model = model;
        if let Some(previous) = self.previous.as_mut() {
            previous.active = false;
        }
    }

    pub fn evaluate(&self) -> Evaluation {
        perceptron::evaluate(&self.model, &self.examples)
    }

    pub fn current_summary(&self) -> Option<PointSummary> {
        let example = self.current_example()?;
        let prediction = self.model.predict(example);
        Some(PointSummary {
            caption: example.caption(),
            position: format!("{} / {}", self.current_index + 1, self.examples.len()),
            epoch: self.epoch,
            prediction,
            truth: example.label,
            is_mistake: prediction != example.label,
        })
    }

    /// Snapshot everything the host persists.
    pub fn export_state(&self) -> InteractionState {
        InteractionState {
            w1: Some(self.model.w1),
            w2: Some(self.model.w2),
            c: Some(self.model.c),
            lr: Some(self.learning_rate),
            current_dataset_name: self.selection.dataset_name.clone(),
            current_collection_name: self.selection.collection_name.clone(),
            cur_index: Some(self.current_index),
            epoch: Some(self.epoch),
            show_all_cases: Some(self.display.show_all_cases),
            show_error: Some(self.display.show_error),
            prev_line_active: Some(self.previous.is_some_and(|previous| previous.active)),
            prev_line: self.previous.map(|previous| previous.model),
        }
    }

    /// Apply whatever fields a saved payload carries.
    ///
    /// The index is clamped only once examples are present, so restoring before
    /// loading a dataset keeps the saved position. A pending acknowledgment
    /// survives unless the payload moves the position.
    pub fn restore(&mut self, state: &InteractionState) {
        if let Some(w1) = state.w1 {
            self.model.w1 = w1;
        }
        if let Some(w2) = state.w2 {
            self.model.w2 = w2;
        }
        if let Some(c) = state.c {
            self.model.c = c;
        }
        if let Some(lr) = state.lr {
            self.learning_rate = lr;
        }
        if let Some(show_all) = state.show_all_cases {
            self.display.show_all_cases = show_all;
        }
        if let Some(show_error) = state.show_error {
            self.display.show_error = show_error;
        }
        if let Some(name) = state.current_dataset_name.as_ref().filter(|name| !name.is_empty()) {
            self.selection.dataset_name = Some(name.clone());
        }
        if let Some(name) = &state.current_collection_name {
            self.selection.collection_name = Some(name.clone());
        }
        if let Some(index) = state.cur_index {
            self.current_index = index;
        }
        if let Some(epoch) = state.epoch {
            self.epoch = epoch;
        }
        match (state.prev_line, state.prev_line_active) {
            (Some(model), active) => {
                let was_active = self.previous.is_some_and(|previous| previous.active);
                self.previous = Some(PreviousModel {
                    model,
                    active: active.unwrap_or(was_active),
                });
            }
            (None, Some(active)) => {
                if let Some(previous) = self.previous.as_mut() {
                    previous.active = active;
                }
            }
            (None, None) => {}
        }
        if state.cur_index.is_some() || state.epoch.is_some() {
            self.phase = Phase::Presenting;
        }
        if !self.examples.is_empty() {
            self.clamp_index();
        }
        info!(
            index = self.current_index,
            epoch = self.epoch,
            "Restored interactive state"
        );
    }

    fn apply_update(&mut self, example: Example) -> UpdateReport {
        let before = self.model;
        let deltas = Model::perceptron_deltas(&example, self.learning_rate);
        self.previous = Some(PreviousModel {
            model: before,
            active: true,
        });
        self.model.apply(deltas);
        self.phase = Phase::AwaitingAck;
        info!(
            id = %example.id,
            dw1 = deltas.dw1,
            dw2 = deltas.dw2,
            dc = deltas.dc,
            "Applied perceptron update"
        );
        UpdateReport {
            example,
            learning_rate: self.learning_rate,
            before,
            after: self.model,
            deltas,
        }
    }

    fn step_forward(&mut self) -> bool {
        if self.examples.is_empty() {
            return false;
        }
        if let Some(previous) = self.previous.as_mut() {
            previous.active = false;
        }
        self.phase = Phase::Presenting;
        self.current_index += 1;
        if self.current_index >= self.examples.len() {
            self.current_index = 0;
            self.epoch += 1;
            return true;
        }
        false
    }

    fn clamp_index(&mut self) {
        let last = self.examples.len().saturating_sub(1);
        self.current_index = self.current_index.min(last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_points() -> Vec<Example> {
        vec![
            Example::new("RA", 0.0, 2.0, Label::Negative),
            Example::new("RI", 2.0, 2.0, Label::Negative),
        ]
    }

    fn session_with(examples: Vec<Example>) -> TrainingSession {
        let mut session = TrainingSession::default();
        session.load_examples(examples);
        session
    }

    #[test]
    fn starts_presenting_first_example() {
        let session = session_with(two_points());
        assert_eq!(session.phase(), Phase::Presenting);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.epoch(), 0);
        assert!(session.can_judge());
    }

    #[test]
    fn mistake_claim_on_correct_point_is_rejected_without_changes() {
        let mut session = session_with(two_points());
        let outcome = session.judge(Verdict::Mistake);
        assert_eq!(outcome, JudgeOutcome::Rejected(Rejection::RuleActuallyWorks));
        assert_eq!(session.model(), Model::DEFAULT);
        assert_eq!(session.current_index(), 0);
        assert!(session.previous().is_none());
    }

    #[test]
    fn correct_claim_on_mistake_is_rejected() {
        let mut session = session_with(two_points());
        session.advance();
        let outcome = session.judge(Verdict::Correct);
        assert_eq!(outcome.rejection(), Some(Rejection::RuleActuallyFails));
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn confirmed_mistake_updates_and_waits_for_ack() {
        let mut session = session_with(two_points());
        session.advance();
        let JudgeOutcome::Accepted(Accepted::Updated(report)) = session.judge(Verdict::Mistake)
        else {
            panic!("expected update");
        };
        assert_eq!(report.before, Model::DEFAULT);
        assert!((session.model().w1 - 0.2).abs() < 1e-12);
        assert!((session.model().w2 + 0.6).abs() < 1e-12);
        assert!((session.model().c - 0.5).abs() < 1e-12);
        assert!(session.is_awaiting_ack());
        assert_eq!(session.active_previous_model(), Some(Model::DEFAULT));
        assert!(!session.can_judge());

        assert_eq!(
            session.judge(Verdict::Mistake).rejection(),
            Some(Rejection::AwaitingAcknowledgement)
        );
        assert_eq!(
            session.judge(Verdict::Correct).rejection(),
            Some(Rejection::AwaitingAcknowledgement)
        );

        let outcome = session.acknowledge();
        assert_eq!(outcome, JudgeOutcome::Accepted(Accepted::Advanced { wrapped: true }));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.epoch(), 1);
        assert_eq!(session.phase(), Phase::Presenting);
        assert_eq!(session.active_previous_model(), None);
        assert_eq!(session.previous().map(|p| p.model), Some(Model::DEFAULT));
    }

    #[test]
    fn advance_waits_for_pending_acknowledgment() {
        let mut session = session_with(two_points());
        session.advance();
        session.judge(Verdict::Mistake);
        session.advance();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.epoch(), 0);
        assert!(session.is_awaiting_ack());
        assert_eq!(session.active_previous_model(), Some(Model::DEFAULT));

        session.acknowledge();
        assert_eq!((session.current_index(), session.epoch()), (0, 1));
        assert!(!session.is_awaiting_ack());
    }

    #[test]
    fn acknowledge_without_pending_update_is_rejected() {
        let mut session = session_with(two_points());
        assert_eq!(
            session.acknowledge().rejection(),
            Some(Rejection::NothingToAcknowledge)
        );
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn empty_dataset_makes_judgments_idle() {
        let mut session = TrainingSession::default();
        assert_eq!(session.judge(Verdict::Correct), JudgeOutcome::Idle);
        assert_eq!(session.judge(Verdict::Mistake), JudgeOutcome::Idle);
        assert_eq!(session.acknowledge(), JudgeOutcome::Idle);
        session.advance();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.epoch(), 0);
        assert!(session.current_summary().is_none());
    }

    #[test]
    fn load_examples_clamps_index_and_keeps_epoch() {
        let mut session = session_with(two_points());
        session.advance();
        session.advance();
        session.advance();
        assert_eq!((session.current_index(), session.epoch()), (1, 1));
        session.load_examples(vec![Example::new("only", 1.0, 0.0, Label::Positive)]);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.epoch(), 1);
        assert_eq!(session.model(), Model::DEFAULT);
    }

    #[test]
    fn switch_table_restarts_progress() {
        let mut session = session_with(two_points());
        session.advance();
        session.advance();
        session.switch_table(two_points());
        assert_eq!((session.current_index(), session.epoch()), (0, 0));
    }

    #[test]
    fn reset_and_apply_model_clear_transition() {
        let mut session = session_with(two_points());
        session.advance();
        session.judge(Verdict::Mistake);
        session.apply_model(Model::new(1.0, 1.0, 1.0));
        assert_eq!(session.active_previous_model(), None);
        assert!(session.is_awaiting_ack());

        session.reset_model();
        assert_eq!(session.model(), Model::DEFAULT);
        assert!(session.previous().is_none());
        assert_eq!((session.current_index(), session.epoch()), (0, 0));
        assert_eq!(session.phase(), Phase::Presenting);
    }

    #[test]
    fn summary_reports_prediction_and_position() {
        let mut session = session_with(two_points());
        session.advance();
        let summary = session.current_summary().unwrap();
        assert_eq!(summary.caption, "RI(2, 2)");
        assert_eq!(summary.position, "2 / 2");
        assert_eq!(summary.prediction, Label::Positive);
        assert_eq!(summary.truth, Label::Negative);
        assert!(summary.is_mistake);
    }

    #[test]
    fn export_then_restore_reproduces_progress_and_rule() {
        let mut session = session_with(two_points());
        session.set_learning_rate(0.3);
        session.advance();
        session.judge(Verdict::Mistake);
        session.display_mut().show_error = true;
        let exported = session.export_state();

        let mut restored = TrainingSession::default();
        restored.restore(&exported);
        restored.load_examples(two_points());
        assert_eq!(restored.model(), session.model());
        assert_eq!(restored.current_index(), session.current_index());
        assert_eq!(restored.epoch(), session.epoch());
        assert_eq!(restored.learning_rate(), 0.3);
        assert!(restored.display().show_error);
        assert_eq!(restored.active_previous_model(), Some(Model::DEFAULT));
        assert_eq!(restored.export_state(), exported);
    }

    #[test]
    fn restore_without_progress_keeps_pending_acknowledgment() {
        let mut session = session_with(two_points());
        session.advance();
        session.judge(Verdict::Mistake);
        session.restore(&InteractionState {
            lr: Some(0.5),
            show_error: Some(true),
            ..InteractionState::default()
        });
        assert!(session.is_awaiting_ack());
        assert_eq!(session.active_previous_model(), Some(Model::DEFAULT));
        assert_eq!(session.learning_rate(), 0.5);

        session.restore(&InteractionState {
            cur_index: Some(0),
            ..InteractionState::default()
        });
        assert_eq!(session.phase(), Phase::Presenting);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn restore_before_load_keeps_out_of_range_index_until_examples_arrive() {
        let mut session = TrainingSession::default();
        session.restore(&InteractionState {
            cur_index: Some(5),
            ..InteractionState::default()
        });
        assert_eq!(session.current_index(), 5);
        session.load_examples(two_points());
        assert_eq!(session.current_index(), 1);
    }
}
