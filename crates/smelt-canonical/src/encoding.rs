use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

/// Errors raised when decoding the flat form back into native values.
///
/// The encode direction is total; only the decode helpers can fail.
#[derive(Error, Debug)]
pub enum EncodingError {
    /// The text is not valid base64.
    #[error("invalid base64 blob: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    /// The epoch offset does not map to a representable timestamp.
    #[error("epoch offset {0} is outside the representable timestamp range")]
    TimestampOutOfRange(f64),
}

/// Fractional seconds since the Unix epoch, the flat-form timestamp encoding.
pub fn epoch_seconds(ts: &DateTime<Utc>) -> f64 {
    ts.timestamp_micros() as f64 / 1_000_000.0
}

/// Rebuilds a timestamp from its epoch-seconds encoding.
///
/// Precision is microseconds, matching [`epoch_seconds`].
pub fn timestamp_from_epoch_seconds(seconds: f64) -> Result<DateTime<Utc>, EncodingError> {
    let micros = (seconds * 1_000_000.0).round();
    if !micros.is_finite() || micros < i64::MIN as f64 || micros > i64::MAX as f64 {
        return Err(EncodingError::TimestampOutOfRange(seconds));
    }
    DateTime::from_timestamp_micros(micros as i64)
        .ok_or(EncodingError::TimestampOutOfRange(seconds))
}

/// Base64 text (standard alphabet, padded), the flat-form blob encoding.
pub fn encode_blob(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decodes flat-form base64 text back into bytes.
pub fn decode_blob(text: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(BASE64.decode(text)?)
}

/// JSON number for a float.
///
/// Non-finite floats have no JSON representation and encode as null, which
/// keeps the flatten path total.
pub fn float_value(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// JSON number for a timestamp, via [`epoch_seconds`].
pub fn timestamp_value(ts: &DateTime<Utc>) -> Value {
    float_value(epoch_seconds(ts))
}
