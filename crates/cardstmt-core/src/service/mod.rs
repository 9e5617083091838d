//! Parsing service contract.

#[cfg(feature = "http")]
pub mod http;

use std::future::Future;

use serde_json::Value;

use crate::error::ServiceError;
use crate::models::candidate::FilePayload;
use crate::models::record::ExtractedRecord;

/// A remote extractor turning an uploaded document into a record.
///
/// Each call is exactly one request; retries are the caller's decision.
pub trait ParseService {
    fn parse<P: FilePayload>(
        &self,
        file: &P,
    ) -> impl Future<Output = Result<ExtractedRecord, ServiceError>>;
}

/// Map a status and raw body onto the response contract.
///
/// 2xx bodies must be JSON objects. Other statuses are rejections whose
/// message comes from a string `error` field when the body has one.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<ExtractedRecord, ServiceError> {
    if (200..300).contains(&status) {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        return ExtractedRecord::try_from(value).map_err(|other| {
            ServiceError::MalformedResponse(format!("expected a JSON object, got {}", kind(&other)))
        });
    }

    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string);

    Err(ServiceError::rejected(status, message))
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
