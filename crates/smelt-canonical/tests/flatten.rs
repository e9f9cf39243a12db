use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use smelt_canonical::{classify, encoding, DynamicMap, DynamicValue};

fn map(entries: Vec<(&str, DynamicValue)>) -> DynamicMap {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[test]
fn flatten_preserves_scalars() {
    let source = map(vec![
        ("flag", DynamicValue::Bool(true)),
        ("count", DynamicValue::Int(42)),
        ("ratio", DynamicValue::Float(0.5)),
        ("name", DynamicValue::from("smelt")),
    ]);

    let flat = classify(&source).to_value();
    assert_eq!(
        flat,
        json!({"flag": true, "count": 42, "ratio": 0.5, "name": "smelt"})
    );
}

#[test]
fn timestamp_flattens_to_epoch_seconds() {
    let when = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
    let source = map(vec![("when", DynamicValue::Timestamp(when))]);

    let flat = classify(&source).flatten();
    assert_eq!(flat.get("when"), Some(&json!(1_700_000_000.5)));
}

#[test]
fn blob_flattens_to_base64() {
    let source = map(vec![("payload", DynamicValue::Blob(b"foobar".to_vec()))]);

    let flat = classify(&source).flatten();
    assert_eq!(flat.get("payload"), Some(&json!("Zm9vYmFy")));
}

#[test]
fn nested_tree_flattens_recursively() {
    let source = map(vec![(
        "outer",
        DynamicValue::Map(map(vec![("inner", DynamicValue::Int(5))])),
    )]);

    let flat = classify(&source).to_value();
    assert_eq!(flat, json!({"outer": {"inner": 5}}));
}

#[test]
fn arrays_flatten_elementwise() {
    let when = Utc.timestamp_opt(1_000_000, 0).unwrap();
    let source = map(vec![
        (
            "counts",
            DynamicValue::Array(vec![DynamicValue::Int(1), DynamicValue::Int(2)]),
        ),
        (
            "payloads",
            DynamicValue::Array(vec![DynamicValue::Blob(b"foo".to_vec())]),
        ),
        (
            "moments",
            DynamicValue::Array(vec![DynamicValue::Timestamp(when)]),
        ),
        (
            "rows",
            DynamicValue::Array(vec![DynamicValue::Map(map(vec![(
                "n",
                DynamicValue::Int(7),
            )]))]),
        ),
    ]);

    let flat = classify(&source).to_value();
    assert_eq!(
        flat,
        json!({
            "counts": [1, 2],
            "payloads": ["Zm9v"],
            "moments": [1_000_000.0],
            "rows": [{"n": 7}]
        })
    );
}

#[test]
fn untyped_array_placeholder_flattens_to_empty_array() {
    let source = map(vec![("y", DynamicValue::Array(Vec::new()))]);

    let flat = classify(&source).to_value();
    assert_eq!(flat, json!({"y": []}));
}

#[test]
fn non_finite_float_flattens_to_null() {
    let source = map(vec![("oops", DynamicValue::Float(f64::NAN))]);

    let flat = classify(&source).flatten();
    assert_eq!(flat.get("oops"), Some(&Value::Null));
}

#[test]
fn timestamp_round_trips_through_epoch_seconds() {
    let when = Utc.timestamp_opt(1_700_000_000, 123_456_000).unwrap();
    let seconds = encoding::epoch_seconds(&when);
    let back = encoding::timestamp_from_epoch_seconds(seconds).unwrap();
    assert_eq!(back, when);
}

#[test]
fn blob_round_trips_through_base64() {
    let bytes: Vec<u8> = (0..=255).collect();
    let text = encoding::encode_blob(&bytes);
    assert_eq!(encoding::decode_blob(&text).unwrap(), bytes);
}

#[test]
fn decode_blob_rejects_invalid_text() {
    assert!(encoding::decode_blob("not base64!").is_err());
}

#[test]
fn non_finite_epoch_offset_is_rejected() {
    assert!(encoding::timestamp_from_epoch_seconds(f64::INFINITY).is_err());
}

/// Maps a flat JSON value back into the loosely typed input space, the way
/// a caller rereading a stored flat record would.
fn rehydrate(value: &Value) -> DynamicValue {
    match value {
        Value::Bool(b) => DynamicValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => DynamicValue::Int(i),
            None => DynamicValue::Float(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => DynamicValue::Text(s.clone()),
        Value::Array(items) => DynamicValue::Array(items.iter().map(rehydrate).collect()),
        Value::Object(entries) => DynamicValue::Map(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), rehydrate(value)))
                .collect(),
        ),
        Value::Null => DynamicValue::Opaque("null".to_string()),
    }
}

#[test]
fn flatten_of_classify_is_idempotent() {
    let when = Utc.timestamp_opt(1_600_000_000, 250_000_000).unwrap();
    let source = map(vec![
        ("flag", DynamicValue::Bool(false)),
        ("count", DynamicValue::Int(7)),
        ("ratio", DynamicValue::Float(1.25)),
        ("when", DynamicValue::Timestamp(when)),
        ("name", DynamicValue::from("fixed point")),
        ("payload", DynamicValue::Blob(vec![1, 2, 3, 4])),
        (
            "nested",
            DynamicValue::Map(map(vec![("inner", DynamicValue::Int(5))])),
        ),
        (
            "counts",
            DynamicValue::Array(vec![DynamicValue::Int(1), DynamicValue::Int(2)]),
        ),
        (
            "names",
            DynamicValue::Array(vec![DynamicValue::from("a"), DynamicValue::from("b")]),
        ),
    ]);

    let first = classify(&source).flatten();

    let rehydrated = match rehydrate(&Value::Object(first.clone())) {
        DynamicValue::Map(entries) => entries,
        other => panic!("expected a map, got {other}"),
    };
    let second = classify(&rehydrated).flatten();

    assert_eq!(first, second);
}
