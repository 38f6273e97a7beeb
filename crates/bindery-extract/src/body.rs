//! JSON body merge.
//!
//! The body is merged onto the target record using the record's own serde
//! field names. Keys missing from the body leave the corresponding fields
//! untouched; nested objects are merged recursively.

use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::BindError;

/// Merges a JSON object body onto `target`.
///
/// When `is_base64` is set the body is base64-decoded (standard alphabet,
/// padded) first. An empty or whitespace-only body leaves `target` as it is.
///
/// The merge round-trips `target` through its serde representation, so a
/// field marked `#[serde(skip)]` is reset to its default.
///
/// # Errors
///
/// - `failed decoding body: ...` when the base64 wrapping is invalid
/// - `invalid request body: ...` when the body is not a JSON object or does
///   not fit the target's fields
/// - a `500` error when `target` itself cannot be represented as JSON
///
/// # Example
///
/// ```rust
/// use bindery_extract::merge_body;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Default)]
/// struct Profile {
///     name: String,
///     age: u32,
/// }
///
/// let mut profile = Profile { name: "Alice".into(), age: 30 };
/// merge_body(br#"{"age": 31}"#, false, &mut profile).unwrap();
///
/// assert_eq!(profile.name, "Alice");
/// assert_eq!(profile.age, 31);
/// ```
pub fn merge_body<T>(body: &[u8], is_base64: bool, target: &mut T) -> Result<(), BindError>
where
    T: Serialize + DeserializeOwned,
{
    let decoded;
    let payload = if is_base64 {
        decoded = base64::engine::general_purpose::STANDARD
            .decode(body)
            .map_err(BindError::body_decoding)?;
        decoded.as_slice()
    } else {
        body
    };

    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }

    let patch = match serde_json::from_slice(payload).map_err(BindError::invalid_body)? {
        JsonValue::Object(patch) => patch,
        other => {
            return Err(BindError::invalid_body_shape(format_args!(
                "expected a JSON object, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut current = serde_json::to_value(&*target).map_err(BindError::merge_target)?;
    merge_object(&mut current, patch);
    *target = serde_json::from_value(current).map_err(BindError::invalid_body)?;
    Ok(())
}

fn merge_object(base: &mut JsonValue, patch: Map<String, JsonValue>) {
    match base {
        JsonValue::Object(fields) => {
            for (key, value) in patch {
                merge_value(fields.entry(key).or_insert(JsonValue::Null), value);
            }
        }
        other => *other = JsonValue::Object(patch),
    }
}

fn merge_value(base: &mut JsonValue, patch: JsonValue) {
    match patch {
        JsonValue::Object(patch) if base.is_object() => merge_object(base, patch),
        patch => *base = patch,
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BindErrorKind, Location};
    use http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Address {
        city: String,
        zip: String,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Account {
        name: String,
        #[serde(rename = "emailAddress")]
        email: String,
        address: Address,
        #[serde(skip)]
        tenant: String,
    }

    fn account() -> Account {
        Account {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            address: Address {
                city: "Paris".into(),
                zip: "75001".into(),
            },
            tenant: "acme".into(),
        }
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let mut target = account();
        merge_body(br#"{"name":"Bob"}"#, false, &mut target).unwrap();

        assert_eq!(target.name, "Bob");
        assert_eq!(target.email, "alice@example.com");
        assert_eq!(target.address.city, "Paris");
    }

    #[test]
    fn test_merge_uses_serde_names() {
        let mut target = account();
        merge_body(br#"{"emailAddress":"bob@example.com","email":"ignored"}"#, false, &mut target)
            .unwrap();
        assert_eq!(target.email, "bob@example.com");
    }

    #[test]
    fn test_merge_nested_objects() {
        let mut target = account();
        merge_body(br#"{"address":{"zip":"75002"}}"#, false, &mut target).unwrap();

        assert_eq!(target.address.city, "Paris");
        assert_eq!(target.address.zip, "75002");
    }

    #[test]
    fn test_skipped_fields_are_reset() {
        let mut target = account();
        merge_body(br#"{"name":"Bob"}"#, false, &mut target).unwrap();
        assert_eq!(target.tenant, "");
    }

    #[test]
    fn test_empty_body_is_noop() {
        let mut target = account();
        merge_body(b"", false, &mut target).unwrap();
        merge_body(b"  \n", false, &mut target).unwrap();
        merge_body(b"", true, &mut target).unwrap();
        assert_eq!(target, account());
    }

    #[test]
    fn test_base64_body() {
        let mut target = account();
        // {"name":"Carol"}
        merge_body(b"eyJuYW1lIjoiQ2Fyb2wifQ==", true, &mut target).unwrap();
        assert_eq!(target.name, "Carol");
    }

    #[test]
    fn test_bad_base64() {
        let mut target = account();
        let err = merge_body(b"not base64!", true, &mut target).unwrap_err();

        assert_eq!(err.kind(), BindErrorKind::Body);
        assert_eq!(err.location(), Some(Location::Body));
        assert!(err.to_string().starts_with("failed decoding body: "));
        assert_eq!(target, account());
    }

    #[test]
    fn test_invalid_json() {
        let mut target = account();
        let err = merge_body(b"{\"name\":", false, &mut target).unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("invalid request body: "));
        assert!(err.to_string().len() > "invalid request body: ".len());
    }

    #[test]
    fn test_non_object_body() {
        let mut target = account();
        let err = merge_body(b"[1,2]", false, &mut target).unwrap_err();
        assert_eq!(err.to_string(), "invalid request body: expected a JSON object, found an array");
    }

    #[test]
    fn test_type_mismatch_in_body() {
        let mut target = account();
        let err = merge_body(br#"{"name": 5}"#, false, &mut target).unwrap_err();
        assert!(err.to_string().starts_with("invalid request body: "));
    }
}
