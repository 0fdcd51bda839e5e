//! Raw response body to payload normalization

use crate::error::ApiError;
use crate::flatten::flatten_element;
use crate::payload::{Payload, Value};

/// Declared format of a response body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// XML document
    #[default]
    Xml,
    /// The registrar's "array" format, which is XML on the wire
    Array,
    /// JSON object mirroring the XML shape
    Json,
}

/// Parse a raw body into a [`Payload`]
///
/// Either the whole body is normalized or a [`ApiError::Parse`] carrying the
/// body unmodified is returned.
pub fn normalize(raw: &str, format: ResponseFormat) -> Result<Payload, ApiError> {
    match format {
        ResponseFormat::Xml | ResponseFormat::Array => from_xml(raw),
        ResponseFormat::Json => from_json(raw),
    }
}

fn from_xml(raw: &str) -> Result<Payload, ApiError> {
    let document = roxmltree::Document::parse(raw)
        .map_err(|e| ApiError::parse(format!("malformed XML: {}", e), raw))?;
    Ok(flatten_element(document.root_element()))
}

fn from_json(raw: &str) -> Result<Payload, ApiError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| ApiError::parse(format!("malformed JSON: {}", e), raw))?;

    match value {
        serde_json::Value::Object(object) => Ok(json_object(object)),
        other => Err(ApiError::parse(
            format!("expected a JSON object at top level, found {}", json_type(&other)),
            raw,
        )),
    }
}

fn json_object(object: serde_json::Map<String, serde_json::Value>) -> Payload {
    object
        .into_iter()
        .filter_map(|(key, value)| json_value(value).map(|v| (key, v)))
        .collect()
}

// `null` members carry nothing and are dropped
fn json_value(value: serde_json::Value) -> Option<Value> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(Value::Text(b.to_string())),
        serde_json::Value::Number(n) => Some(Value::Text(n.to_string())),
        serde_json::Value::String(s) => Some(Value::Text(s)),
        serde_json::Value::Array(items) => Some(Value::List(
            items.into_iter().filter_map(json_value).collect(),
        )),
        serde_json::Value::Object(object) => Some(Value::Map(json_object(object))),
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
