use serde::{Deserialize, Serialize};

use super::example::{Example, Label};

/// Scores at or above `-SCORE_EPS` count as positive, so points sitting on the
/// boundary (including float noise just below zero) are classified `+1`.
pub const SCORE_EPS: f64 = 1e-6;

/// Linear decision rule `w1·x + w2·y + c`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub w1: f64,
    pub w2: f64,
    pub c: f64,
}

/// Coefficient changes produced by one perceptron step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateDeltas {
    pub dw1: f64,
    pub dw2: f64,
    pub dc: f64,
}

impl Model {
    /// Rule a fresh session starts from.
    pub const DEFAULT: Model = Model {
        w1: 0.4,
        w2: -0.4,
        c: 0.6,
    };

    pub const fn new(w1: f64, w2: f64, c: f64) -> Self {
        Self { w1, w2, c }
    }

    /// Raw linear score at a data-space position.
    pub fn score_at(&self, x: f64, y: f64) -> f64 {
        self.w1 * x + self.w2 * y + self.c
    }

    /// Linear score for an example.
    pub fn score(&self, example: &Example) -> f64 {
        self.score_at(example.feat1, example.feat2)
    }

    /// Predicted class for an example.
    pub fn predict(&self, example: &Example) -> Label {
        predict(self.score(example))
    }

    /// True when the prediction disagrees with the example's label.
    pub fn is_mistake(&self, example: &Example) -> bool {
        self.predict(example) != example.label
    }

    /// True when the rule has no boundary line (both weights zero).
    pub fn is_degenerate(&self) -> bool {
        self.w1 == 0.0 && self.w2 == 0.0
    }

    /// Deltas of the mistake-driven perceptron update for `example`.
    ///
    /// `w1 += lr·y·x1`, `w2 += lr·y·x2`, `c += lr·y`.
    pub fn perceptron_deltas(example: &Example, learning_rate: f64) -> UpdateDeltas {
        let y = example.label.value();
        UpdateDeltas {
            dw1: learning_rate * y * example.feat1,
            dw2: learning_rate * y * example.feat2,
            dc: learning_rate * y,
        }
    }

    /// Apply precomputed deltas in place.
    pub fn apply(&mut self, deltas: UpdateDeltas) {
        self.w1 += deltas.dw1;
        self.w2 += deltas.dw2;
        self.c += deltas.dc;
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Map a raw score to a class using the epsilon-inclusive convention.
pub fn predict(score: f64) -> Label {
    if score >= -SCORE_EPS {
        Label::Positive
    } else {
        Label::Negative
    }
}
