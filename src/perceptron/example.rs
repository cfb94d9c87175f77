use std::fmt;

/// Binary class of a training point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Normalize a raw label: any non-negative value is positive.
    pub fn from_raw(raw: f64) -> Self {
        if raw >= 0.0 { Self::Positive } else { Self::Negative }
    }

    /// Signed numeric value (`+1.0` / `-1.0`).
    pub fn value(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }

    /// Signed integer value (`1` / `-1`).
    pub fn sign(self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "+1 (Positive)"),
            Self::Negative => write!(f, "-1 (Negative)"),
        }
    }
}

/// One labeled point. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Example {
    pub id: String,
    pub feat1: f64,
    pub feat2: f64,
    pub label: Label,
    /// Free text the point was derived from, if the dataset has one.
    pub text: Option<String>,
}

impl Example {
    pub fn new(id: impl Into<String>, feat1: f64, feat2: f64, label: Label) -> Self {
        Self {
            id: id.into(),
            feat1,
            feat2,
            label,
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Short form used in the point panel, e.g. `RA(0, 2)`.
    pub fn caption(&self) -> String {
        format!("{}({}, {})", self.id, self.feat1, self.feat2)
    }
}
