use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::entities::row::Row;

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn object_to_row(object: &Map<String, Value>) -> Row {
    Row::from_pairs(
        object
            .iter()
            .map(|(column, value)| (column.clone(), cell_to_string(value))),
    )
}

/// Accepts a bare array of rows, an object with a `rows` array, or any other
/// object whose values are the rows. Entries that are not objects are
/// skipped.
pub fn rows_from_json(document: &Value) -> Vec<Row> {
    let entries: Vec<&Value> = match document {
        Value::Array(items) => items.iter().collect(),
        Value::Object(object) => match object.get("rows") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => object.values().collect(),
        },
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| match entry {
            Value::Object(object) => Some(object_to_row(object)),
            _ => {
                warn!(idx, "skipping dataset entry that is not an object");
                None
            }
        })
        .collect()
}

pub fn rows_from_json_str(text: &str) -> Result<Vec<Row>> {
    let document: Value = serde_json::from_str(text).context("failed to parse json dataset")?;
    Ok(rows_from_json(&document))
}

pub fn read_json_rows(path: &Path) -> Result<Vec<Row>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read json: {}", path.display()))?;
    rows_from_json_str(&text).with_context(|| format!("invalid json dataset: {}", path.display()))
}
