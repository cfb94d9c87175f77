//! Example sources: the embedded sample and JSON dataset files.

mod record;
mod sample;

pub use record::{base_name, normalize_record, numeric};
pub use sample::{SAMPLE_COLLECTION, SAMPLE_NAME, sample_dataset};

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::perceptron::Example;
use crate::session::DatasetSelection;

/// A named, ordered set of examples.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub collection: Option<String>,
    pub examples: Vec<Example>,
}

impl Dataset {
    pub fn selection(&self) -> DatasetSelection {
        DatasetSelection {
            dataset_name: Some(self.name.clone()),
            collection_name: self.collection.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Dataset {path} must be an array of records or an object with a \"cases\" array")]
    Shape { path: PathBuf },
}

/// Load a dataset file; the name falls back to the file stem.
pub fn load_file(path: &Path) -> Result<Dataset, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let fallback = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Dataset".to_string());
    let dataset = from_value(value, &fallback).ok_or_else(|| DatasetError::Shape {
        path: path.to_path_buf(),
    })?;
    info!(
        name = %dataset.name,
        count = dataset.examples.len(),
        "Loaded dataset file"
    );
    Ok(dataset)
}

/// Accept `[record, ...]` or `{ "name": ..., "cases": [record, ...] }`.
pub fn from_value(value: Value, fallback_name: &str) -> Option<Dataset> {
    let (name, collection, rows) = match value {
        Value::Array(rows) => (fallback_name.to_string(), None, rows),
        Value::Object(mut object) => {
            let Some(Value::Array(rows)) = object.remove("cases") else {
                return None;
            };
            let name = object
                .get("name")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .unwrap_or(fallback_name)
                .to_string();
            let collection = object
                .get("collection")
                .and_then(Value::as_str)
                .map(str::to_string);
            (name, collection, rows)
        }
        _ => return None,
    };
    Some(Dataset {
        name,
        collection,
        examples: examples_from_rows(&rows),
    })
}

/// Normalize rows, skipping anything that is not an object.
pub fn examples_from_rows(rows: &[Value]) -> Vec<Example> {
    rows.iter()
        .enumerate()
        .filter_map(|(position, row)| match row {
            Value::Object(record) => Some(normalize_record(record, position)),
            _ => {
                warn!(position, "Skipping dataset row that is not an object");
                None
            }
        })
        .collect()
}
