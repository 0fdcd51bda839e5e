//! Call outcome extraction

use crate::classify::classify;
use crate::error::ApiError;
use crate::payload::{Payload, Value};
use tracing::{debug, warn};

/// Status literal reported by successful calls
pub const SUCCESS_STATUS: &str = "OK";

/// Result of one successful API call
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutcome {
    /// Always true for a returned outcome; failures surface as errors
    pub success: bool,
    /// Command that produced this outcome
    pub command: String,
    /// The `CommandResponse` section
    pub data: Payload,
    /// Registrar errors (empty for a returned outcome)
    pub errors: Vec<String>,
    /// Registrar warnings, in order
    pub warnings: Vec<String>,
    /// Server that handled the call
    pub server: Option<String>,
    /// Server-side execution time in seconds
    pub execution_time: Option<f64>,
    /// Server time zone offset, e.g. `--5:00`
    pub gmt_time_difference: Option<String>,
}

/// Build a [`CallOutcome`] from a normalized payload
///
/// A status other than `OK` and a non-empty error list are each treated as
/// failure on their own; either one yields the classified error.
pub fn extract_outcome(mut payload: Payload, command: &str) -> Result<CallOutcome, ApiError> {
    let status = payload.attr("Status").unwrap_or_default().to_string();
    let errors = collect_messages(&payload, "Errors", "Error", "Unknown error");
    let warnings = collect_messages(&payload, "Warnings", "Warning", "Unknown warning");

    if status != SUCCESS_STATUS || !errors.is_empty() {
        let errors = if errors.is_empty() {
            vec![format!("Call failed with status {:?}", status)]
        } else {
            errors
        };
        let err = classify(errors, command);
        debug!(command, status = %status, kind = ?err.kind(), error = %err, "Namecheap call failed");
        return Err(err);
    }

    for warning in &warnings {
        warn!(command, warning = %warning, "Namecheap reported a warning");
    }

    let data = match payload.remove("CommandResponse") {
        Some(Value::Map(data)) => data,
        _ => Payload::new(),
    };

    Ok(CallOutcome {
        success: true,
        command: command.to_string(),
        data,
        errors,
        warnings,
        server: payload.child_text("Server").map(String::from),
        execution_time: payload
            .child_text("ExecutionTime")
            .and_then(|t| t.trim().parse::<f64>().ok()),
        gmt_time_difference: payload.child_text("GMTTimeDifference").map(String::from),
    })
}

/// Format every node of a section as `[<Number>] <text>`
fn collect_messages(payload: &Payload, section: &str, node: &str, placeholder: &str) -> Vec<String> {
    let Some(nodes) = payload.child(section).and_then(|s| s.get(node)) else {
        return Vec::new();
    };

    let items = match nodes {
        Value::List(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };

    items
        .iter()
        .map(|item| match item {
            Value::Map(map) => format!(
                "[{}] {}",
                map.attr("Number").unwrap_or("UNKNOWN"),
                map.text().unwrap_or(placeholder)
            ),
            Value::Text(text) => format!("[UNKNOWN] {}", text),
            Value::List(_) => format!("[UNKNOWN] {}", placeholder),
        })
        .collect()
}
