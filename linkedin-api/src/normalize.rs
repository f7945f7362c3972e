//! Defensive JSON extraction.
//!
//! Voyager payloads are deeply nested, unversioned and change without
//! notice. Every field is read through a JSON pointer with a default: a
//! missing key yields the empty value and a `trace!` event, a value of the
//! wrong type yields the empty value and a `debug!` event. Extraction never
//! fails as a whole.

use serde_json::Value;
use tracing::{debug, trace};

/// A record that can be flattened out of one Voyager JSON document.
pub trait Normalize: Sized {
    fn normalize(doc: &Value) -> Self;
}

/// Normalize `doc` into `T`.
pub fn normalize<T: Normalize>(doc: &Value) -> T {
    T::normalize(doc)
}

/// Normalize each element of the array at `pointer`.
pub fn normalize_all<T: Normalize>(doc: &Value, pointer: &str) -> Vec<T> {
    array(doc, pointer).iter().map(T::normalize).collect()
}

fn lookup<'a>(doc: &'a Value, pointer: &str) -> Option<&'a Value> {
    match doc.pointer(pointer) {
        Some(Value::Null) | None => {
            trace!(pointer, "field missing");
            None
        }
        found => found,
    }
}

fn mismatch(pointer: &str, expected: &str, found: &Value) {
    debug!(pointer, expected, found = kind(found), "unexpected field type");
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// String at `pointer`, if present and a string.
pub fn opt_text(doc: &Value, pointer: &str) -> Option<String> {
    let v = lookup(doc, pointer)?;
    match v.as_str() {
        Some(s) => Some(s.to_owned()),
        None => {
            mismatch(pointer, "string", v);
            None
        }
    }
}

/// String at `pointer`, or `""`.
pub fn text(doc: &Value, pointer: &str) -> String {
    opt_text(doc, pointer).unwrap_or_default()
}

pub fn opt_i64(doc: &Value, pointer: &str) -> Option<i64> {
    let v = lookup(doc, pointer)?;
    let n = v.as_i64();
    if n.is_none() {
        mismatch(pointer, "integer", v);
    }
    n
}

/// Unsigned integer at `pointer`, or `0`.
pub fn number(doc: &Value, pointer: &str) -> u64 {
    let Some(v) = lookup(doc, pointer) else {
        return 0;
    };
    v.as_u64().unwrap_or_else(|| {
        mismatch(pointer, "unsigned integer", v);
        0
    })
}

/// Boolean at `pointer`, or `false`.
pub fn flag(doc: &Value, pointer: &str) -> bool {
    let Some(v) = lookup(doc, pointer) else {
        return false;
    };
    v.as_bool().unwrap_or_else(|| {
        mismatch(pointer, "bool", v);
        false
    })
}

/// Array at `pointer`, or an empty slice.
pub fn array<'a>(doc: &'a Value, pointer: &str) -> &'a [Value] {
    let Some(v) = lookup(doc, pointer) else {
        return &[];
    };
    match v.as_array() {
        Some(arr) => arr,
        None => {
            mismatch(pointer, "array", v);
            &[]
        }
    }
}

/// Sub-document at `pointer`, or `Value::Null` (which every helper above
/// treats as "missing").
pub fn node<'a>(doc: &'a Value, pointer: &str) -> &'a Value {
    static NULL: Value = Value::Null;
    lookup(doc, pointer).unwrap_or(&NULL)
}

/// Full URL of a `VectorImage`: `rootUrl` + the chosen artifact's
/// `fileIdentifyingUrlPathSegment`.
///
/// `artifact` picks the size; when the image has fewer artifacts the
/// largest (last) one is used. `None` when the image is absent.
pub fn vector_image_url(image: &Value, artifact: usize) -> Option<String> {
    let root = opt_text(image, "/rootUrl")?;
    let artifacts = array(image, "/artifacts");
    let chosen = artifacts.get(artifact).or_else(|| artifacts.last())?;
    let segment = opt_text(chosen, "/fileIdentifyingUrlPathSegment")?;
    Some(root + &segment)
}

/// Trailing id of a URN: `urn:li:fs_miniProfile:ACoAAB` → `ACoAAB`.
pub fn id_from_urn(urn: &str) -> &str {
    urn.rsplit(':').next().unwrap_or(urn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_on_missing_and_mismatch() {
        let doc = json!({ "a": { "b": 5, "s": "x", "n": null }, "list": "nope" });
        assert_eq!(text(&doc, "/a/s"), "x");
        assert_eq!(text(&doc, "/a/b"), "");
        assert_eq!(text(&doc, "/a/missing/deeper"), "");
        assert_eq!(opt_text(&doc, "/a/n"), None);
        assert_eq!(number(&doc, "/a/b"), 5);
        assert_eq!(number(&doc, "/a/s"), 0);
        assert!(!flag(&doc, "/a/b"));
        assert!(array(&doc, "/list").is_empty());
        assert!(node(&doc, "/zzz").is_null());
    }

    #[test]
    fn image_url_prefers_requested_artifact() {
        let image = json!({
            "rootUrl": "https://media/",
            "artifacts": [
                { "fileIdentifyingUrlPathSegment": "100.jpg" },
                { "fileIdentifyingUrlPathSegment": "200.jpg" },
                { "fileIdentifyingUrlPathSegment": "400.jpg" },
            ]
        });
        assert_eq!(vector_image_url(&image, 0).as_deref(), Some("https://media/100.jpg"));
        assert_eq!(vector_image_url(&image, 2).as_deref(), Some("https://media/400.jpg"));
        assert_eq!(vector_image_url(&image, 9).as_deref(), Some("https://media/400.jpg"));
    }

    #[test]
    fn image_url_missing_parts() {
        assert_eq!(vector_image_url(&Value::Null, 0), None);
        let no_artifacts = json!({ "rootUrl": "https://media/", "artifacts": [] });
        assert_eq!(vector_image_url(&no_artifacts, 0), None);
    }

    #[test]
    fn urn_ids() {
        assert_eq!(id_from_urn("urn:li:fs_miniProfile:ACoAAB"), "ACoAAB");
        assert_eq!(id_from_urn("plain"), "plain");
    }
}
