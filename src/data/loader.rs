use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::model::Country;
use crate::cluster::ClusteringResult;
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Read a file whose top level is a JSON array.
///
/// Elements are returned untouched; the fetch stage may have written a
/// plain error string instead of country objects.
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    let root: Value = serde_json::from_str(&text).map_err(|e| PipelineError::json(path, e))?;

    match root {
        Value::Array(records) => Ok(records),
        other => Err(PipelineError::shape(
            path,
            format!("expected a top-level JSON array, found {}", kind(&other)),
        )),
    }
}

/// Read a dataset file where every element is a country object.
pub fn load_countries(path: &Path) -> Result<Vec<Country>> {
    load_records(path)?
        .into_iter()
        .enumerate()
        .map(|(i, rec)| match rec {
            Value::Object(fields) => Ok(Country::new(fields)),
            other => Err(PipelineError::shape(
                path,
                format!("row {i} is {}, not an object: {other}", kind(&other)),
            )),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// JSON writer
// ---------------------------------------------------------------------------

/// Overwrite `path` with the records as UTF-8 JSON, indented by four spaces.
pub fn save_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut ser)
        .map_err(|e| PipelineError::json(path, e))?;

    std::fs::write(path, buf).map_err(|e| PipelineError::io(path, e))
}

pub fn save_countries(path: &Path, countries: &[Country]) -> Result<()> {
    let fields: Vec<&serde_json::Map<String, Value>> =
        countries.iter().map(|c| &c.fields).collect();
    save_records(path, &fields)
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write one row per clustered country. Cluster ids are 1-based, matching
/// the labels shown in the summary and the plot legend.
pub fn export_assignments_csv(path: &Path, result: &ClusteringResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["name", "population_density", "gini", "cluster"])?;

    for ((name, feature), label) in result
        .names
        .iter()
        .zip(result.features.iter())
        .zip(result.labels.iter())
    {
        writer.write_record([
            name.clone(),
            feature[0].to_string(),
            feature[1].to_string(),
            (label + 1).to_string(),
        ])?;
    }

    writer.flush().map_err(|e| PipelineError::io(path, e))
}
