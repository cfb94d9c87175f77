//! Interactive state exchanged with the host document.
//!
//! The payload uses the host's camelCase keys. Every field is optional on
//! import so partial or older payloads restore whatever they carry.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::perceptron::Model;
use crate::settings::atomic_write;

/// Serializable snapshot of a training session and its display toggles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionState {
    pub w1: Option<f64>,
    pub w2: Option<f64>,
    pub c: Option<f64>,
    pub lr: Option<f64>,
    pub current_dataset_name: Option<String>,
    pub current_collection_name: Option<String>,
    pub cur_index: Option<usize>,
    pub epoch: Option<u64>,
    pub show_all_cases: Option<bool>,
    pub show_error: Option<bool>,
    pub prev_line_active: Option<bool>,
    pub prev_line: Option<Model>,
}

/// Errors raised while reading or writing an interaction state payload.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Invalid interactive state: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to serialize interactive state: {0}")]
    Serialize(serde_json::Error),
    #[error("Failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl InteractionState {
    pub fn from_json(text: &str) -> Result<Self, StateError> {
        serde_json::from_str(text).map_err(StateError::Parse)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, StateError> {
        serde_json::from_value(value).map_err(StateError::Parse)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, StateError> {
        serde_json::to_value(self).map_err(StateError::Serialize)
    }

    pub fn to_json_pretty(&self) -> Result<String, StateError> {
        serde_json::to_string_pretty(self).map_err(StateError::Serialize)
    }

    /// Model coefficients when all three are present.
    pub fn model(&self) -> Option<Model> {
        Some(Model::new(self.w1?, self.w2?, self.c?))
    }

    /// Read a session file written by [`InteractionState::save`].
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let text = std::fs::read_to_string(path).map_err(|source| StateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Replace the session file in one rename so an interrupted save keeps the old one.
    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        let text = self.to_json_pretty()?;
        atomic_write(path, text.as_bytes()).map_err(|source| StateError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
