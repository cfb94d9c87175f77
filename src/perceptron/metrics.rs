use super::example::Example;
use super::model::Model;

/// Per-point regression-style error of the linear score against the label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointError {
    pub score: f64,
    /// `label - score`.
    pub error: f64,
    pub squared_error: f64,
}

/// Aggregate quality of a rule over a whole dataset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    /// Fraction of points predicted correctly, in `[0, 1]`.
    pub accuracy: f64,
    /// Mean of `(label - score)^2`.
    pub mean_squared_error: f64,
    pub count: usize,
}

impl Evaluation {
    /// Accuracy as a percentage string with one decimal, e.g. `55.6%`.
    pub fn accuracy_percent(&self) -> String {
        format!("{:.1}%", 100.0 * self.accuracy)
    }
}

pub fn point_error(model: &Model, example: &Example) -> PointError {
    let score = model.score(example);
    let error = example.label.value() - score;
    PointError {
        score,
        error,
        squared_error: error * error,
    }
}

/// Accuracy and MSE over every example. An empty set evaluates to zeros.
pub fn evaluate(model: &Model, examples: &[Example]) -> Evaluation {
    if examples.is_empty() {
        return Evaluation {
            accuracy: 0.0,
            mean_squared_error: 0.0,
            count: 0,
        };
    }
    let mut correct = 0usize;
    let mut sum_sq = 0.0;
    for example in examples {
        let metrics = point_error(model, example);
        if super::model::predict(metrics.score) == example.label {
            correct += 1;
        }
        sum_sq += metrics.squared_error;
    }
    let count = examples.len();
    Evaluation {
        accuracy: correct as f64 / count as f64,
        mean_squared_error: sum_sq / count as f64,
        count,
    }
}
