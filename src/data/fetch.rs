//! Download the raw country list.
//!
//! A non-200 answer is not treated as a failure: the status and body are
//! embedded into the output as a single error string, so the next stage
//! sees it in the file.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{PipelineError, Result};

/// HTTP request timeout for the single GET.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GET `url` and return the country records.
pub fn fetch_countries(url: &str) -> Result<Vec<Value>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    log::info!("GET {url}");
    let response = client.get(url).send()?;
    let status = response.status();
    let body = response.text()?;
    log::debug!("{url} answered {status} with {} bytes", body.len());

    records_from_response(url, status, &body)
}

/// Turn a response into records.
///
/// * `200`  – the body must be a JSON array, returned as-is.
/// * other – one-element list `["Error: <code> - <body>"]`.
pub fn records_from_response(url: &str, status: StatusCode, body: &str) -> Result<Vec<Value>> {
    if status != StatusCode::OK {
        log::warn!("{url} returned HTTP {}", status.as_u16());
        return Ok(vec![Value::String(format!(
            "Error: {} - {body}",
            status.as_u16()
        ))]);
    }

    match serde_json::from_str(body).map_err(|e| PipelineError::json(url, e))? {
        Value::Array(records) => Ok(records),
        _ => Err(PipelineError::shape(url, "response body is not a JSON array")),
    }
}
