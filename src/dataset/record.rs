use serde_json::{Map, Value};

use crate::perceptron::{Example, Label};

const FEAT1_KEYS: [&str; 3] = ["feat1", "Cbest", "x"];
const FEAT2_KEYS: [&str; 3] = ["feat2", "Cbad", "y"];
const LABEL_KEYS: [&str; 4] = ["label", "Sentiment", "sentiment", "Label"];
const ID_KEYS: [&str; 2] = ["ID", "id"];
const TEXT_KEYS: [&str; 2] = ["Text", "text"];

/// `"feat1: Cbest"` → `"feat1"`.
pub fn base_name(column: &str) -> &str {
    column.split(':').next().unwrap_or(column).trim()
}

/// Loose numeric reading of a cell: numbers, numeric strings, booleans and null.
pub fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Turn one record into an example; `position` is the fallback identity.
pub fn normalize_record(record: &Map<String, Value>, position: usize) -> Example {
    let mut cells: Map<String, Value> = Map::with_capacity(record.len());
    for (column, value) in record {
        cells.insert(base_name(column).to_string(), value.clone());
    }
    let first = |keys: &[&str]| keys.iter().find_map(|key| cells.get(*key).filter(|v| !v.is_null()));
    let first_numeric = |keys: &[&str]| keys.iter().find_map(|key| cells.get(*key).and_then(numeric));

    let mut feat1 = first_numeric(&FEAT1_KEYS);
    let mut feat2 = first_numeric(&FEAT2_KEYS);
    if feat1.is_none() || feat2.is_none() {
        let reserved = |key: &str| {
            LABEL_KEYS.contains(&key) || ID_KEYS.contains(&key) || TEXT_KEYS.contains(&key)
        };
        let mut spare = cells
            .iter()
            .filter(|(key, _)| !reserved(key))
            .filter_map(|(_, value)| numeric(value));
        let auto1 = spare.next();
        let auto2 = spare.next();
        feat1 = feat1.or(auto1);
        feat2 = feat2.or(auto2);
    }

    // A label that is present but unreadable counts as negative; only a missing one is 0.
    let label = match first(&LABEL_KEYS) {
        Some(value) => numeric(value).map_or(Label::Negative, Label::from_raw),
        None => Label::from_raw(0.0),
    };
    let id = first(&ID_KEYS)
        .and_then(text)
        .unwrap_or_else(|| position.to_string());
    let example = Example::new(
        id,
        feat1.unwrap_or(0.0),
        feat2.unwrap_or(0.0),
        label,
    );
    match first(&TEXT_KEYS).and_then(text) {
        Some(body) if !body.is_empty() => example.with_text(body),
        _ => example,
    }
}
