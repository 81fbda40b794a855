//! CLI output: error mapping and report rendering.

use crate::error::PmError;
use crate::operation::Report;

/// Map domain errors to a string for CLI output.
/// Attached guidance is printed separately by the binary.
pub fn map_error(e: &PmError) -> String {
    format!("ERROR: {}", e)
}

/// Render a report as its summary text or as pretty JSON.
pub fn format_report(report: &Report, json: bool) -> Result<String, PmError> {
    if json {
        serde_json::to_string_pretty(report).map_err(|e| {
            PmError::delegation(report.operation.as_str(), format!("cannot encode report: {}", e))
        })
    } else {
        Ok(report.summary.clone())
    }
}
