//! Records returned by the parsing service.

use serde::Serialize;
use serde_json::{Map, Value};

/// Field name to display value, in the order the service sent them.
///
/// Keys are service-defined; nothing here checks them against a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtractedRecord(Map<String, Value>);

impl ExtractedRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Get a field's raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterate fields in service order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Value> for ExtractedRecord {
    type Error = Value;

    /// Only JSON objects are records; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_preserves_service_order() {
        let value: Value =
            serde_json::from_str(r#"{"total_due":"1.00","issuer":"Chase","due_date":"2024-05-01"}"#)
                .unwrap();
        let record = ExtractedRecord::try_from(value).unwrap();

        let keys: Vec<&str> = record.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["total_due", "issuer", "due_date"]);
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(ExtractedRecord::try_from(json!(["issuer"])).is_err());
        assert!(ExtractedRecord::try_from(json!("Chase")).is_err());
        assert!(ExtractedRecord::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_serializes_verbatim() {
        let record = ExtractedRecord::try_from(json!({"issuer": "Chase", "extra": 3})).unwrap();
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"issuer":"Chase","extra":3}"#
        );
    }
}
