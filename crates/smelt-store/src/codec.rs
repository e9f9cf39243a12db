//! The codec boundary.
//!
//! serde_json wrapped behind explicit encode/decode entry points that map
//! failures to [`StoreError`] kinds. Decode is structure-aware: bytes
//! deserialize straight into the destination type and never route through
//! the flat form.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::locator::RecordName;

/// Encodes a record to JSON bytes.
pub fn encode_vec<T: Serialize + ?Sized>(record: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(record).map_err(StoreError::Encode)
}

/// Encodes a record to a JSON string.
pub fn encode_string<T: Serialize + ?Sized>(record: &T) -> Result<String, StoreError> {
    serde_json::to_string(record).map_err(StoreError::Encode)
}

/// Encodes a record to a JSON value tree.
pub fn encode_value<T: Serialize + ?Sized>(record: &T) -> Result<Value, StoreError> {
    serde_json::to_value(record).map_err(StoreError::Encode)
}

/// Decodes a record from JSON bytes.
pub fn decode_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(StoreError::Decode)
}

/// Decodes a record from a JSON string.
pub fn decode_str<T: DeserializeOwned>(text: &str) -> Result<T, StoreError> {
    serde_json::from_str(text).map_err(StoreError::Decode)
}

/// Decodes a record from a JSON value tree.
pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(StoreError::Decode)
}

/// Interprets raw resource bytes as UTF-8 text.
pub fn text_from_bytes(bytes: Vec<u8>) -> Result<String, StoreError> {
    String::from_utf8(bytes)
        .map_err(|err| StoreError::Conversion(format!("payload is not valid UTF-8: {err}")))
}

/// Views a record as a JSON object.
///
/// A record that serializes to a top-level array is wrapped under a
/// synthetic key derived from its type name; any other non-object shape is
/// a conversion failure.
pub fn record_to_map<T: Serialize>(record: &T) -> Result<Map<String, Value>, StoreError> {
    match encode_value(record)? {
        Value::Object(map) => Ok(map),
        Value::Array(items) => {
            let name = RecordName::for_type::<T>()?;
            let mut map = Map::new();
            map.insert(name.as_ref().to_string(), Value::Array(items));
            Ok(map)
        }
        other => Err(StoreError::Conversion(format!(
            "top-level JSON {} cannot be viewed as an object",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
