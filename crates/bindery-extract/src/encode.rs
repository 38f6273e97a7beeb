//! Inverse binding: rendering a record back into request data.
//!
//! Used to build outgoing requests, or test fixtures, from the same record
//! types the decoder binds onto.

use serde::Serialize;

use crate::error::{BindError, Location};
use crate::schema::{resolve_record, Bind};
use crate::source::{RequestSource, RequestSourceBuilder};

/// Renders the annotated fields of `record` into a [`RequestSource`].
///
/// Scalars become one occurrence of their key. Arrays become one occurrence
/// per element, except in the path, where they are joined with commas. Unset
/// optionals and empty arrays produce nothing.
///
/// Decoding the result gives back the same field values, with two
/// exceptions: an array holding a single empty string decodes as empty, and
/// a path array whose strings contain commas is split apart.
///
/// # Errors
///
/// Returns a descriptor error if a binding is malformed or the record does
/// not report a value for one of its annotated fields.
pub fn encode<T: Bind>(record: &T) -> Result<RequestSource, BindError> {
    Ok(render_fields(record, RequestSource::builder())?.build())
}

/// Like [`encode`], and also serializes `record` as the JSON body.
///
/// # Errors
///
/// As [`encode`]; serialization failures are server-side errors.
pub fn encode_with_body<T: Bind + Serialize>(record: &T) -> Result<RequestSource, BindError> {
    let body = serde_json::to_vec(record).map_err(BindError::merge_target)?;
    Ok(render_fields(record, RequestSource::builder())?
        .body(body)
        .build())
}

fn render_fields<T: Bind>(
    record: &T,
    mut builder: RequestSourceBuilder,
) -> Result<RequestSourceBuilder, BindError> {
    for descriptor in resolve_record::<T>()? {
        let value = record
            .value_of(descriptor.field)
            .ok_or_else(|| BindError::unknown_field(descriptor.field))?;
        let rendered = value.render();
        if rendered.is_empty() {
            continue;
        }

        builder = match descriptor.location {
            Location::Path => builder.path_param(descriptor.key, rendered.join(",")),
            Location::Query => rendered
                .into_iter()
                .fold(builder, |b, text| b.query(descriptor.key, text)),
            Location::Header => rendered
                .into_iter()
                .fold(builder, |b, text| b.header(descriptor.key, text)),
            Location::Body => builder,
        };
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_fields;
    use crate::schema::FieldSpec;
    use crate::value::{FieldValue, Value, ValueMismatch};
    use bindery_core::ObjectId;

    #[derive(Debug, Default, Clone, PartialEq, Serialize)]
    struct Search {
        owner: ObjectId,
        terms: Vec<String>,
        limit: Option<u16>,
        trace: bool,
    }

    impl Bind for Search {
        fn fields() -> Vec<FieldSpec> {
            vec![
                FieldSpec::bound("owner", "path.owner", ObjectId::descriptor()),
                FieldSpec::bound("terms", "query.terms", <Vec<String>>::descriptor()),
                FieldSpec::bound("limit", "query.limit", <Option<u16>>::descriptor()),
                FieldSpec::bound("trace", "header.X-Trace", bool::descriptor()),
            ]
        }

        fn assign(&mut self, field: &str, value: Value) -> Result<(), BindError> {
            let mismatch = |e: ValueMismatch| BindError::mismatch(field, e);
            match field {
                "owner" => self.owner = FieldValue::from_value(value).map_err(mismatch)?,
                "terms" => self.terms = FieldValue::from_value(value).map_err(mismatch)?,
                "limit" => self.limit = FieldValue::from_value(value).map_err(mismatch)?,
                "trace" => self.trace = FieldValue::from_value(value).map_err(mismatch)?,
                _ => return Err(BindError::unknown_field(field)),
            }
            Ok(())
        }

        fn value_of(&self, field: &str) -> Option<Value> {
            match field {
                "owner" => Some(self.owner.to_value()),
                "terms" => Some(self.terms.to_value()),
                "limit" => Some(self.limit.to_value()),
                "trace" => Some(self.trace.to_value()),
                _ => None,
            }
        }
    }

    fn sample() -> Search {
        Search {
            owner: ObjectId::from_bytes([0xab; 12]),
            terms: vec!["rust".into(), "serde".into()],
            limit: Some(25),
            trace: true,
        }
    }

    #[test]
    fn test_encode_places_fields() {
        let source = encode(&sample()).unwrap();

        assert_eq!(source.path_params().get("owner"), Some("abababababababababababab"));
        assert_eq!(source.query().get_all("terms").map(<[String]>::len), Some(2));
        assert_eq!(source.query().get("limit"), Some("25"));
        assert_eq!(source.headers().get("X-Trace"), Some("true"));
        assert!(source.body().is_empty());
    }

    #[test]
    fn test_unset_and_empty_are_omitted() {
        let record = Search {
            terms: vec![],
            limit: None,
            ..sample()
        };
        let source = encode(&record).unwrap();

        assert!(!source.query().contains_key("terms"));
        assert!(!source.query().contains_key("limit"));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let original = sample();
        let source = encode(&original).unwrap();

        let mut decoded = Search::default();
        decode_fields(&source, &mut decoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_encode_with_body() {
        let source = encode_with_body(&sample()).unwrap();
        let body: serde_json::Value = serde_json::from_slice(source.body()).unwrap();
        assert_eq!(body["limit"], 25);
    }
}
