use serde::{Deserialize, Serialize};
use serde_json::json;
use smelt_canonical::{classify, DynamicMap, DynamicValue};
use smelt_store::{codec, Cipher, CipherError, FileStore, RecordName, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Preferences {
    theme: String,
    font_size: u32,
    favorites: Vec<String>,
}

fn sample() -> Preferences {
    Preferences {
        theme: "dark".to_string(),
        font_size: 14,
        favorites: vec!["a".to_string(), "b".to_string()],
    }
}

fn store() -> (tempfile::TempDir, FileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    (dir, store)
}

/// Toy cipher for exercising the sealing seam; real ciphers live outside
/// this workspace.
struct XorCipher(u8);

impl Cipher for XorCipher {
    fn seal(&self, plain: &[u8]) -> Result<Vec<u8>, CipherError> {
        Ok(plain.iter().map(|byte| byte ^ self.0).collect())
    }

    fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.seal(sealed)
    }
}

#[test]
fn save_then_load_by_type_name() {
    let (_dir, store) = store();
    let record = sample();

    let path = store.save(&record).unwrap();
    assert!(path.ends_with("Preferences.json"));

    let loaded: Preferences = store.load().unwrap();
    assert_eq!(loaded, record);
}

#[test]
fn save_as_appends_extension_once() {
    let (_dir, store) = store();

    let path = store.save_as(&sample(), "prefs").unwrap();
    assert!(path.ends_with("prefs.json"));

    let path = store.save_as(&sample(), "prefs.json").unwrap();
    assert!(path.ends_with("prefs.json"));

    let loaded: Preferences = store.load_as("prefs").unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn load_missing_record_is_not_found() {
    let (_dir, store) = store();
    let result: Result<Preferences, _> = store.load_as("absent");
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn malformed_names_are_rejected() {
    let (_dir, store) = store();
    for name in ["", "../escape", "nested/path", ".hidden"] {
        let result = store.save_as(&sample(), name);
        assert!(
            matches!(result, Err(StoreError::InvalidName(_))),
            "name {name:?} should be rejected"
        );
    }
}

#[test]
fn delete_removes_the_record() {
    let (_dir, store) = store();
    store.save(&sample()).unwrap();
    assert!(store.exists("Preferences").unwrap());

    store.delete::<Preferences>().unwrap();
    assert!(!store.exists("Preferences").unwrap());

    let result = store.delete::<Preferences>();
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn sealed_round_trip_restores_the_record() {
    let (_dir, store) = store();
    let cipher = XorCipher(0x5A);
    let record = sample();

    let path = store.save_sealed(&record, "secrets", &cipher).unwrap();

    // Stored bytes are not the plain codec bytes.
    let on_disk = std::fs::read(&path).unwrap();
    assert_ne!(on_disk, serde_json::to_vec(&record).unwrap());

    let loaded: Preferences = store.load_sealed("secrets", &cipher).unwrap();
    assert_eq!(loaded, record);

    // Reading the sealed bytes without the cipher fails at decode.
    let result: Result<Preferences, _> = store.load_as("secrets");
    assert!(matches!(result, Err(StoreError::Decode(_))));
}

#[test]
fn save_tree_writes_the_flat_form() {
    let (_dir, store) = store();
    let source: DynamicMap = [
        ("flag".to_string(), DynamicValue::Bool(true)),
        ("count".to_string(), DynamicValue::Int(7)),
        ("name".to_string(), DynamicValue::from("profile")),
    ]
    .into_iter()
    .collect();

    let path = store.save_tree(&classify(&source), "profile").unwrap();

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(written, json!({"flag": true, "count": 7, "name": "profile"}));
}

#[test]
fn codec_string_round_trip() {
    let text = codec::encode_string(&sample()).unwrap();
    let back: Preferences = codec::decode_str(&text).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn record_to_map_wraps_top_level_arrays() {
    let records = vec![sample()];
    let map = codec::record_to_map(&records).unwrap();
    assert_eq!(map.len(), 1);
    assert!(map.get("Vec").map(|v| v.is_array()).unwrap_or(false));

    let map = codec::record_to_map(&sample()).unwrap();
    assert_eq!(map.get("theme"), Some(&json!("dark")));

    let back: Preferences = codec::decode_value(serde_json::Value::Object(map)).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn record_to_map_rejects_scalars() {
    let result = codec::record_to_map(&42_u32);
    assert!(matches!(result, Err(StoreError::Conversion(_))));
}

#[test]
fn text_from_bytes_requires_utf8() {
    assert_eq!(
        codec::text_from_bytes(b"plain".to_vec()).unwrap(),
        "plain"
    );
    let result = codec::text_from_bytes(vec![0xFF, 0xFE]);
    assert!(matches!(result, Err(StoreError::Conversion(_))));
}

#[test]
fn type_derived_names_strip_paths_and_generics() {
    assert_eq!(RecordName::for_type::<Preferences>().unwrap().as_ref(), "Preferences");
    assert_eq!(
        RecordName::for_type::<Vec<Preferences>>().unwrap().as_ref(),
        "Vec"
    );
    assert_eq!(
        RecordName::parse("Preferences").unwrap().file_name(),
        "Preferences.json"
    );
}
