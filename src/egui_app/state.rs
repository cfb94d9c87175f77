//! Transient UI state shown around the plot.

use crate::perceptron::Evaluation;
use crate::session::UpdateReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertTone {
    Info,
    Warning,
}

/// One-line feedback after a refused or notable action.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub message: String,
    pub tone: AlertTone,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: AlertTone::Info,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: AlertTone::Warning,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub alert: Option<Alert>,
    /// Derivation of the last perceptron step, shown until acknowledged.
    pub report: Option<UpdateReport>,
    /// Accuracy of the current rule; cleared whenever the rule changes.
    pub evaluation: Option<Evaluation>,
    pub status: String,
}

impl UiState {
    pub fn clear_feedback(&mut self) {
        self.alert = None;
        self.report = None;
    }
}
