//! Record schemas and the field descriptor resolver.
//!
//! A bindable record lists its fields through [`Bind::fields`]. The resolver
//! turns the annotated ones into [`FieldDescriptor`]s, validating every
//! annotation before any request data is looked at.

use crate::descriptor::TypeDescriptor;
use crate::error::{BindError, Location};
use crate::value::Value;

/// A record whose fields can be bound from request data.
///
/// Usually derived with `#[derive(Bind)]`:
///
/// ```rust,ignore
/// use bindery::prelude::*;
///
/// #[derive(Bind, Default)]
/// struct ListUsers {
///     #[bind("query.page")]
///     page: Option<u32>,
///     #[bind("header.X-Tenant")]
///     tenant: String,
/// }
/// ```
pub trait Bind {
    /// Lists the record's fields in declaration order.
    fn fields() -> Vec<FieldSpec>;

    /// Assigns a coerced value to the named field.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no such field or the value does not
    /// fit the field's type.
    fn assign(&mut self, field: &str, value: Value) -> Result<(), BindError>;

    /// Reads the named field back as a [`Value`].
    ///
    /// Returns `None` for unknown or unannotated fields.
    fn value_of(&self, field: &str) -> Option<Value>;
}

/// One field of a bindable record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as declared.
    pub name: &'static str,
    /// Binding annotation and declared type, if the field is annotated.
    pub binding: Option<FieldBinding>,
}

impl FieldSpec {
    /// Describes an annotated field.
    #[must_use]
    pub fn bound(name: &'static str, annotation: &'static str, ty: TypeDescriptor) -> Self {
        Self {
            name,
            binding: Some(FieldBinding { annotation, ty }),
        }
    }

    /// Describes a field without a binding annotation.
    #[must_use]
    pub const fn unbound(name: &'static str) -> Self {
        Self {
            name,
            binding: None,
        }
    }
}

/// Raw binding annotation of a field, as written on the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    /// The `location.key` annotation text.
    pub annotation: &'static str,
    /// Declared type of the field.
    pub ty: TypeDescriptor,
}

/// A resolved binding: where to look and what to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Record field name.
    pub field: &'static str,
    /// Source location.
    pub location: Location,
    /// Source key, verbatim from the annotation.
    pub key: &'static str,
    /// Declared type.
    pub ty: TypeDescriptor,
}

/// Resolves a record's field list into descriptors.
///
/// Unannotated fields are skipped. The first malformed annotation or
/// unsupported type aborts resolution.
///
/// # Errors
///
/// Returns a descriptor error naming the field when the annotation is not
/// exactly `location.key`, the location is not `path`, `query` or `header`,
/// or the declared type has an unsupported shape.
///
/// # Example
///
/// ```rust
/// use bindery_extract::{resolve, FieldSpec, FieldValue, Location};
///
/// let fields = vec![
///     FieldSpec::bound("page", "query.page", <Option<u32>>::descriptor()),
///     FieldSpec::unbound("payload"),
/// ];
/// let resolved = resolve(fields).unwrap();
///
/// assert_eq!(resolved.len(), 1);
/// assert_eq!(resolved[0].location, Location::Query);
/// assert_eq!(resolved[0].key, "page");
///
/// let bad = vec![FieldSpec::bound("id", "cookie.id", String::descriptor())];
/// assert!(resolve(bad).is_err());
/// ```
pub fn resolve(fields: Vec<FieldSpec>) -> Result<Vec<FieldDescriptor>, BindError> {
    fields
        .into_iter()
        .filter_map(|spec| spec.binding.map(|binding| (spec.name, binding)))
        .map(|(name, binding)| resolve_one(name, binding))
        .collect()
}

/// Resolves the fields of `T`.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_record<T: Bind>() -> Result<Vec<FieldDescriptor>, BindError> {
    resolve(T::fields())
}

fn resolve_one(field: &'static str, binding: FieldBinding) -> Result<FieldDescriptor, BindError> {
    let FieldBinding { annotation, ty } = binding;

    let mut parts = annotation.split('.');
    let (Some(token), Some(key), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(BindError::descriptor(
            field,
            format_args!("annotation '{annotation}' must have the form 'location.key'"),
        ));
    };

    let location = Location::from_binding_token(token)
        .ok_or_else(|| BindError::descriptor(field, format_args!("invalid location '{token}'")))?;

    ty.validate()
        .map_err(|details| BindError::descriptor(field, details))?;

    Ok(FieldDescriptor {
        field,
        location,
        key,
        ty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BindErrorKind;
    use crate::value::FieldValue;

    fn spec(annotation: &'static str) -> Vec<FieldSpec> {
        vec![FieldSpec::bound("field", annotation, String::descriptor())]
    }

    #[test]
    fn test_resolves_in_declaration_order() {
        let fields = vec![
            FieldSpec::bound("id", "path.id", u64::descriptor()),
            FieldSpec::unbound("body"),
            FieldSpec::bound("tenant", "header.X-Tenant", String::descriptor()),
            FieldSpec::bound("tags", "query.tag", <Vec<String>>::descriptor()),
        ];
        let resolved = resolve(fields).unwrap();

        let names: Vec<_> = resolved.iter().map(|d| d.field).collect();
        assert_eq!(names, vec!["id", "tenant", "tags"]);
        assert_eq!(resolved[0].location, Location::Path);
        assert_eq!(resolved[1].key, "X-Tenant");
        assert_eq!(resolved[2].location, Location::Query);
    }

    #[test]
    fn test_key_is_verbatim() {
        let resolved = resolve(spec("query. Page ")).unwrap();
        assert_eq!(resolved[0].key, " Page ");
    }

    #[test]
    fn test_empty_key_is_allowed() {
        let resolved = resolve(spec("query.")).unwrap();
        assert_eq!(resolved[0].key, "");
    }

    #[test]
    fn test_rejects_missing_period() {
        let err = resolve(spec("querypage")).unwrap_err();
        assert_eq!(err.kind(), BindErrorKind::Descriptor);
        assert_eq!(err.field(), Some("field"));
    }

    #[test]
    fn test_rejects_extra_period() {
        let err = resolve(spec("query.user.id")).unwrap_err();
        assert!(err.to_string().contains("query.user.id"));
    }

    #[test]
    fn test_rejects_unknown_location() {
        let err = resolve(spec("cookie.session")).unwrap_err();
        assert!(err.to_string().contains("invalid location 'cookie'"));
        assert!(err.to_string().contains("field"));
    }

    #[test]
    fn test_location_is_case_sensitive() {
        assert!(resolve(spec("Header.X-Id")).is_err());
        assert!(resolve(spec("body.name")).is_err());
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let fields = vec![FieldSpec::bound(
            "grid",
            "query.grid",
            TypeDescriptor::array(<Vec<i32>>::descriptor()),
        )];
        let err = resolve(fields).unwrap_err();
        assert_eq!(err.kind(), BindErrorKind::Descriptor);
        assert!(err.to_string().contains("grid"));
    }

    #[test]
    fn test_later_error_reported_even_after_valid_fields() {
        let fields = vec![
            FieldSpec::bound("ok", "query.ok", bool::descriptor()),
            FieldSpec::bound("bad", "nowhere", bool::descriptor()),
        ];
        let err = resolve(fields).unwrap_err();
        assert_eq!(err.field(), Some("bad"));
    }
}
