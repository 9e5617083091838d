//! Result shaping: extracted records to labelled display rows.

use serde::Serialize;
use serde_json::Value;

use crate::models::record::ExtractedRecord;

/// Known service fields and their display labels.
const DISPLAY_LABELS: &[(&str, &str)] = &[
    ("issuer", "Card Issuer"),
    ("card_number", "Card Number (Last 4)"),
    ("due_date", "Payment Due Date"),
    ("total_due", "Total Amount Due"),
    ("statement_period", "Statement Period"),
];

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayField {
    /// Raw service key.
    pub key: String,
    pub label: String,
    pub value: String,
}

impl DisplayField {
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.label, &self.value)
    }
}

/// Label for a service key; unknown keys label themselves.
pub fn display_label(key: &str) -> &str {
    DISPLAY_LABELS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// Text shown for a field value.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Rows for a record, in the record's order.
pub fn shape_record(record: &ExtractedRecord) -> Vec<DisplayField> {
    record
        .iter()
        .map(|(key, value)| DisplayField {
            key: key.clone(),
            label: display_label(key).to_string(),
            value: display_value(value),
        })
        .collect()
}
