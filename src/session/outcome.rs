use std::fmt;

use crate::perceptron::{Example, Model, UpdateDeltas, rule_text};

/// The learner's claim about the current example under the current rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// "The rule predicts this point correctly."
    Correct,
    /// "The rule fails on this point."
    Mistake,
}

/// Result of a judgment or acknowledgment request.
#[derive(Clone, Debug, PartialEq)]
pub enum JudgeOutcome {
    Accepted(Accepted),
    Rejected(Rejection),
    /// No current example (empty dataset); nothing happened.
    Idle,
}

impl JudgeOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// What an accepted request did to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Accepted {
    /// Moved to the next example; `wrapped` is set when a new epoch began.
    Advanced { wrapped: bool },
    /// A perceptron update was applied and now awaits acknowledgment.
    Updated(UpdateReport),
}

/// Why a request was refused. Rejections never mutate the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Learner said "correct" but the rule mispredicts the point.
    RuleActuallyFails,
    /// Learner said "fails" but the rule predicts the point correctly.
    RuleActuallyWorks,
    /// An update is pending acknowledgment.
    AwaitingAcknowledgement,
    /// Acknowledge was requested with no pending update.
    NothingToAcknowledge,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Self::RuleActuallyFails => {
                "Check again! The current rule does NOT correctly predict this point."
            }
            Self::RuleActuallyWorks => {
                "Check again! The current rule DOES correctly predict this point."
            }
            Self::AwaitingAcknowledgement => {
                "The rule was just improved. Confirm the improved rule before judging again."
            }
            Self::NothingToAcknowledge => "There is no rule improvement to confirm.",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Everything needed to explain one perceptron step to the learner.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateReport {
    pub example: Example,
    pub learning_rate: f64,
    pub before: Model,
    pub after: Model,
    pub deltas: UpdateDeltas,
}

impl UpdateReport {
    /// Step-by-step derivation of the new coefficients.
    pub fn explanation_lines(&self) -> Vec<String> {
        let y = self.example.label.sign();
        let lr = self.learning_rate;
        let (old, new) = (&self.before, &self.after);
        let feat1 = self.example.feat1;
        let feat2 = self.example.feat2;
        vec![
            "Model format: w1·feature1 + w2·feature2 + c ≥ 0".to_string(),
            format!("Old model: {}", rule_text::signed_rule(old)),
            "w1 adjustment".to_string(),
            "New w1 = Old w1 + LearnRate × TrueLabel × feat1".to_string(),
            format!("New w1 = {:.2} + {lr:.2} × ({y}) × {feat1}", old.w1),
            format!("New w1 = {:.2}", new.w1),
            "w2 adjustment".to_string(),
            "New w2 = Old w2 + LearnRate × TrueLabel × feat2".to_string(),
            format!("New w2 = {:.2} + {lr:.2} × ({y}) × {feat2}", old.w2),
            format!("New w2 = {:.2}", new.w2),
            "c adjustment".to_string(),
            "New c = Old c + LearnRate × TrueLabel".to_string(),
            format!("New c = {:.2} + {lr:.2} × ({y})", old.c),
            format!("New c = {:.2}", new.c),
            format!("New model: {}", rule_text::signed_rule(new)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perceptron::Label;

    #[test]
    fn explanation_walks_through_each_coefficient() {
        let example = Example::new("RI", 2.0, 2.0, Label::Negative);
        let before = Model::DEFAULT;
        let deltas = Model::perceptron_deltas(&example, 0.1);
        let mut after = before;
        after.apply(deltas);
        let report = UpdateReport {
            example,
            learning_rate: 0.1,
            before,
            after,
            deltas,
        };
        let lines = report.explanation_lines();
        assert_eq!(lines[1], "Old model: 0.40·feat1 − 0.40·feat2 + 0.60 ≥ 0");
        assert_eq!(lines[4], "New w1 = 0.40 + 0.10 × (-1) × 2");
        assert_eq!(lines[5], "New w1 = 0.20");
        assert_eq!(lines[13], "New c = 0.50");
        assert_eq!(
            lines.last().map(String::as_str),
            Some("New model: 0.20·feat1 − 0.60·feat2 + 0.50 ≥ 0")
        );
    }

    #[test]
    fn rejection_messages_name_the_actual_outcome() {
        assert!(Rejection::RuleActuallyFails.message().contains("does NOT"));
        assert!(Rejection::RuleActuallyWorks.to_string().contains("DOES"));
    }
}
