//! The type coercion engine.
//!
//! [`coerce`] turns the raw string(s) found for one field into a [`Value`]
//! of the field's declared type. Dispatch is an exhaustive match over
//! [`TypeDescriptor`]:
//!
//! | Declared type | Absent / empty input | Present input |
//! |---------------|----------------------|---------------|
//! | scalar        | zero value           | parsed        |
//! | `Optional<T>` | unset                | parsed as `T` |
//! | `Array<T>`    | empty array          | each occurrence, or one occurrence split on `,` |
//! | alias         | as the inner type    | parsed as the inner type |
//!
//! Only a string-typed optional keeps an empty string as a value; for every
//! other type an empty string is treated like absence.

use bindery_core::{Date, ObjectId, Timestamp};

use crate::descriptor::{DomainKind, FloatWidth, IntWidth, ScalarKind, TypeDescriptor};
use crate::error::{BindError, Location};
use crate::value::Value;

/// Separator for arrays delivered as a single occurrence.
const ARRAY_SEPARATOR: char = ',';

/// Case-insensitive truthy vocabulary for booleans; anything else is false.
const TRUTHY: [&str; 5] = ["1", "true", "on", "enabled", "t"];

/// The raw data found for one field.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    /// Where the data was looked up.
    pub location: Location,
    /// The key that was looked up.
    pub key: &'a str,
    /// The single-valued view, if the key was present.
    pub single: Option<&'a str>,
    /// The multi-valued view, if the key was present.
    pub multi: Option<&'a [String]>,
}

impl<'a> Lookup<'a> {
    /// Creates a lookup that found nothing.
    #[must_use]
    pub const fn absent(location: Location, key: &'a str) -> Self {
        Self {
            location,
            key,
            single: None,
            multi: None,
        }
    }

    /// Returns true if neither view holds the key.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.single.is_none() && self.multi.is_none()
    }

    /// Returns the text a scalar field is parsed from.
    ///
    /// Prefers the single-valued view and falls back to the last occurrence
    /// of the multi-valued view.
    #[must_use]
    pub fn text(&self) -> Option<&'a str> {
        self.single
            .or_else(|| self.multi.and_then(<[String]>::last).map(String::as_str))
    }

    /// Returns the element strings an array field is built from.
    ///
    /// Two or more occurrences are used as they are. A single occurrence,
    /// from either view, is split on commas. No input or an empty string
    /// gives no elements.
    #[must_use]
    pub fn elements(&self) -> Vec<&'a str> {
        if let Some(multi) = self.multi.filter(|m| m.len() > 1) {
            return multi.iter().map(String::as_str).collect();
        }
        let first = self
            .multi
            .and_then(<[String]>::first)
            .map(String::as_str)
            .or(self.single);
        match first {
            None | Some("") => Vec::new(),
            Some(text) => text.split(ARRAY_SEPARATOR).collect(),
        }
    }
}

/// Coerces the data found for a field into a value of type `ty`.
///
/// # Errors
///
/// Returns an invalid-value error naming the key when the text does not
/// parse as the declared type or does not fit its width, and a descriptor
/// error when `ty` has an unsupported shape.
///
/// # Example
///
/// ```rust
/// use bindery_extract::{coerce, FieldValue, Location, Lookup, Value};
///
/// let occurrences = vec!["a".to_string(), "b".to_string()];
/// let lookup = Lookup {
///     location: Location::Query,
///     key: "terms",
///     single: Some("b"),
///     multi: Some(&occurrences),
/// };
/// let value = coerce(&<Vec<String>>::descriptor(), &lookup).unwrap();
/// assert_eq!(value, Value::Array(vec![Value::String("a".into()), Value::String("b".into())]));
///
/// let absent = Lookup::absent(Location::Query, "page");
/// assert_eq!(coerce(&<Option<i64>>::descriptor(), &absent).unwrap(), Value::Unset);
/// assert_eq!(coerce(&i64::descriptor(), &absent).unwrap(), Value::Int(0));
/// ```
pub fn coerce(ty: &TypeDescriptor, lookup: &Lookup<'_>) -> Result<Value, BindError> {
    match ty {
        TypeDescriptor::Array(inner) => coerce_array(inner, lookup),
        TypeDescriptor::Optional(inner) if matches!(inner.as_ref(), TypeDescriptor::Array(_)) => {
            if lookup.is_absent() {
                Ok(Value::Unset)
            } else {
                coerce(inner, lookup)
            }
        }
        _ => coerce_text(ty, lookup.text(), lookup),
    }
}

fn coerce_array(element: &TypeDescriptor, lookup: &Lookup<'_>) -> Result<Value, BindError> {
    lookup
        .elements()
        .into_iter()
        .map(|text| coerce_text(element, Some(text), lookup))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn coerce_text(ty: &TypeDescriptor, text: Option<&str>, lookup: &Lookup<'_>) -> Result<Value, BindError> {
    match ty {
        TypeDescriptor::Optional(inner) => match text {
            None => Ok(Value::Unset),
            Some("") if !inner.is_string() => Ok(Value::Unset),
            Some(_) => coerce_text(inner, text, lookup),
        },
        TypeDescriptor::Alias { inner, .. } => coerce_text(inner, text, lookup),
        TypeDescriptor::Array(_) => Err(BindError::descriptor(
            lookup.key,
            format_args!("nested arrays are not supported ({ty})"),
        )),
        TypeDescriptor::Scalar(kind) => match text {
            None | Some("") => Ok(Value::zero(ty)),
            Some(text) => parse_scalar(*kind, text, lookup),
        },
        TypeDescriptor::Domain(kind) => match text {
            None | Some("") => Ok(Value::zero(ty)),
            Some(text) => parse_domain(*kind, text, lookup),
        },
    }
}

fn parse_scalar(kind: ScalarKind, text: &str, lookup: &Lookup<'_>) -> Result<Value, BindError> {
    let key = lookup.key;
    match kind {
        ScalarKind::String => Ok(Value::String(text.to_owned())),
        ScalarKind::Int(width) => parse_signed(width, text)
            .map(Value::Int)
            .ok_or_else(|| invalid(lookup, format!("{key} must be a valid integer"))),
        ScalarKind::Uint(width) => parse_unsigned(width, text)
            .map(Value::Uint)
            .ok_or_else(|| invalid(lookup, format!("{key} must be a valid, positive integer"))),
        ScalarKind::Float(width) => parse_float(width, text)
            .map(Value::Float)
            .ok_or_else(|| invalid(lookup, format!("{key} must be a valid floating point number"))),
        ScalarKind::Bool => Ok(Value::Bool(parse_bool(text))),
    }
}

fn parse_domain(kind: DomainKind, text: &str, lookup: &Lookup<'_>) -> Result<Value, BindError> {
    let key = lookup.key;
    match kind {
        DomainKind::Date => Date::parse(text)
            .map(Value::Date)
            .map_err(|_| invalid(lookup, format!("{key} must be a valid date (YYYY-MM-DD)"))),
        DomainKind::Timestamp => Timestamp::parse(text)
            .map(Value::Timestamp)
            .map_err(|_| invalid(lookup, format!("{key} must be a valid RFC 3339 timestamp"))),
        DomainKind::ObjectId => ObjectId::parse(text)
            .map(Value::ObjectId)
            .map_err(|_| invalid(lookup, format!("{key}: invalid identifier"))),
    }
}

fn parse_signed(width: IntWidth, text: &str) -> Option<i64> {
    text.parse::<i64>().ok().filter(|n| width.fits_signed(*n))
}

fn parse_unsigned(width: IntWidth, text: &str) -> Option<u64> {
    text.parse::<u64>().ok().filter(|n| width.fits_unsigned(*n))
}

fn parse_float(width: FloatWidth, text: &str) -> Option<f64> {
    let parsed = match width {
        FloatWidth::W32 => text.parse::<f32>().ok().map(f64::from),
        FloatWidth::W64 => text.parse::<f64>().ok(),
    }?;
    // Out-of-range input parses to infinity; only explicit literals may.
    if parsed.is_infinite() && !is_special_float_literal(text) {
        return None;
    }
    Some(parsed)
}

fn is_special_float_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|literal| unsigned.eq_ignore_ascii_case(literal))
}

fn parse_bool(text: &str) -> bool {
    TRUTHY.iter().any(|truthy| text.eq_ignore_ascii_case(truthy))
}

fn invalid(lookup: &Lookup<'_>, message: String) -> BindError {
    BindError::invalid_value(lookup.location, lookup.key, message)
}
