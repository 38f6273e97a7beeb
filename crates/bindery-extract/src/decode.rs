//! Decode entry points.
//!
//! A decode call resolves the target's bindings, optionally merges the body,
//! then coerces and assigns every annotated field in declaration order. A
//! field whose key is absent from its location is not assigned, so it keeps
//! its default or the value the body gave it. The first failure ends the
//! call.
//!
//! Decoding is not atomic: fields assigned before a failure, and a body
//! merged before a field failure, stay on the target. Treat the target as
//! unusable once a decode call has returned an error.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::body::merge_body;
use crate::coerce::coerce;
use crate::error::BindError;
use crate::schema::{resolve_record, Bind, FieldDescriptor};
use crate::source::RequestSource;

/// Options for a decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Merge the JSON body onto the target before binding fields.
    pub merge_body: bool,
}

impl DecodeOptions {
    /// Binds annotated fields only.
    #[must_use]
    pub const fn fields_only() -> Self {
        Self { merge_body: false }
    }

    /// Merges the body, then binds annotated fields.
    #[must_use]
    pub const fn with_body() -> Self {
        Self { merge_body: true }
    }
}

/// Decodes `source` onto `target`.
///
/// Bindings are resolved first, so a malformed annotation fails before the
/// body or any field is touched.
///
/// # Errors
///
/// Returns the first descriptor, body or coercion failure.
///
/// # Example
///
/// ```rust,ignore
/// use bindery::prelude::*;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Bind, Default, Serialize, Deserialize)]
/// struct UpdateUser {
///     #[bind("path.userId")]
///     #[serde(skip)]
///     user_id: u64,
///     name: String,
/// }
///
/// let source = RequestSource::builder()
///     .path_param("userId", "42")
///     .body(r#"{"name":"Alice"}"#)
///     .build();
///
/// let mut target = UpdateUser::default();
/// decode(&source, &mut target, DecodeOptions::with_body())?;
/// assert_eq!(target.user_id, 42);
/// assert_eq!(target.name, "Alice");
/// ```
pub fn decode<T>(source: &RequestSource, target: &mut T, options: DecodeOptions) -> Result<(), BindError>
where
    T: Bind + Serialize + DeserializeOwned,
{
    resolve_record::<T>()
        .and_then(|descriptors| {
            if options.merge_body {
                merge_body(source.body(), source.body_is_base64(), target)?;
            }
            bind_fields(source, target, &descriptors)
        })
        .map_err(log_failure)
}

/// Binds the annotated fields of `target` without looking at the body.
///
/// # Errors
///
/// Returns the first descriptor or coercion failure.
pub fn decode_fields<T: Bind>(source: &RequestSource, target: &mut T) -> Result<(), BindError> {
    resolve_record::<T>()
        .and_then(|descriptors| bind_fields(source, target, &descriptors))
        .map_err(log_failure)
}

fn bind_fields<T: Bind>(
    source: &RequestSource,
    target: &mut T,
    descriptors: &[FieldDescriptor],
) -> Result<(), BindError> {
    for descriptor in descriptors {
        tracing::trace!(
            field = descriptor.field,
            location = %descriptor.location,
            key = descriptor.key,
            ty = %descriptor.ty,
            "binding field"
        );

        let lookup = source.lookup(descriptor.location, descriptor.key);
        if lookup.is_absent() {
            // Absent keys leave the field as the default or the body set it.
            continue;
        }
        let value = coerce(&descriptor.ty, &lookup).map_err(|e| e.for_field(descriptor.field))?;
        target.assign(descriptor.field, value)?;
    }
    Ok(())
}

fn log_failure(err: BindError) -> BindError {
    tracing::debug!(
        code = err.error_code(),
        field = err.field(),
        location = err.location().map(|l| l.as_str()),
        key = err.key(),
        error = %err,
        "decode failed"
    );
    err
}
