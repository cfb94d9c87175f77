//! Perceptron scoring, prediction, update rule and evaluation.
//!
//! Everything here is a pure function of a [`Model`] and the examples it is
//! applied to; the training session owns the mutable state.

mod example;
mod metrics;
mod model;
pub mod rule_text;

pub use example::{Example, Label};
pub use metrics::{Evaluation, PointError, evaluate, point_error};
pub use model::{Model, SCORE_EPS, UpdateDeltas, predict};
