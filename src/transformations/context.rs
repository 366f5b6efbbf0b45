//! Envelope context and payload field access.
//!
//! Payload shapes are provider-dependent and only loosely structured, so
//! handlers read them through `FieldMap`, a key-lookup view with explicit
//! absent-tolerant accessors: a missing key decodes to a null cell, never an
//! error. Only structurally wrong shapes (a mapping where a sequence was
//! expected, and the like) surface as errors.

use serde_json::{Map, Value};

use super::error::TransformError;
use crate::sink::CsvValue;

/// A decoded envelope ready for flattening.
pub struct EnvelopeContext<'a> {
    pub event_name: &'a str,
    /// Enqueued time shifted to Brasília local time, `DD/MM/YYYY`. Computed
    /// once per envelope and shared by every row derived from it.
    pub local_date: &'a str,
    /// The re-decoded `Payload` JSON.
    pub payload: &'a Value,
}

impl<'a> EnvelopeContext<'a> {
    pub fn new(event_name: &'a str, local_date: &'a str, payload: &'a Value) -> Self {
        Self {
            event_name,
            local_date,
            payload,
        }
    }

    /// The payload as a mapping, or a shape error.
    pub fn payload_object(&self) -> Result<FieldMap<'a>, TransformError> {
        FieldMap::from_value(self.payload)
            .ok_or_else(|| TransformError::shape(self.event_name, "payload is not an object"))
    }

    /// The payload as a sequence, or a shape error.
    pub fn payload_array(&self) -> Result<&'a [Value], TransformError> {
        self.payload
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| TransformError::shape(self.event_name, "payload is not an array"))
    }
}

/// Key-based access into a payload mapping.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap<'a>(&'a Map<String, Value>);

impl<'a> FieldMap<'a> {
    /// View a JSON value as a mapping; `None` if it is anything else.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(FieldMap)
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.get(key)
    }

    /// Extract a field as a cell value; absent maps to `CsvValue::Null`.
    pub fn value(&self, key: &str) -> CsvValue {
        self.get(key).map(cell_value).unwrap_or(CsvValue::Null)
    }

    /// Extract a field as a cell value; absent and null map to an empty string.
    pub fn value_or_empty(&self, key: &str) -> CsvValue {
        let value = self.value(key);
        if value.is_null() {
            CsvValue::text("")
        } else {
            value
        }
    }

    /// Extract a string field; absent or non-string maps to `None`.
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Extract a field that is itself a mapping.
    pub fn object(&self, key: &str) -> Option<FieldMap<'a>> {
        self.get(key).and_then(FieldMap::from_value)
    }

    /// Extract a field that is a sequence.
    pub fn array(&self, key: &str) -> Option<&'a [Value]> {
        self.get(key).and_then(Value::as_array).map(Vec::as_slice)
    }
}

/// Map a JSON value onto its CSV cell representation.
///
/// Scalars keep their JSON type so the sink's quote policy applies per type.
/// Containers in a scalar position pass through as compact JSON text.
pub fn cell_value(value: &Value) -> CsvValue {
    match value {
        Value::Null => CsvValue::Null,
        Value::Bool(flag) => CsvValue::Bool(*flag),
        Value::Number(number) => CsvValue::Number(number.clone()),
        Value::String(text) => CsvValue::Text(text.clone()),
        other => CsvValue::Text(other.to_string()),
    }
}
