//! Typed values produced by the coercion engine.
//!
//! [`Value`] is the engine's output; [`FieldValue`] connects a Rust field
//! type to its [`TypeDescriptor`] and converts between the two.

use std::fmt;

use bindery_core::{Date, ObjectId, Timestamp};
use thiserror::Error;

use crate::descriptor::{DomainKind, FloatWidth, IntWidth, ScalarKind, TypeDescriptor};

/// A coerced value, ready to be assigned to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An optional with no value.
    Unset,
    /// A string.
    String(String),
    /// A signed integer, already range-checked for the target width.
    Int(i64),
    /// An unsigned integer, already range-checked for the target width.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// A calendar date.
    Date(Date),
    /// A timestamp.
    Timestamp(Timestamp),
    /// A 12-byte identifier.
    ObjectId(ObjectId),
    /// The elements of an array field.
    Array(Vec<Value>),
}

impl Value {
    /// Returns the zero value for a scalar or domain scalar descriptor.
    ///
    /// Optionals are [`Value::Unset`] and arrays are empty.
    #[must_use]
    pub fn zero(ty: &TypeDescriptor) -> Self {
        match ty {
            TypeDescriptor::Scalar(kind) => match kind {
                ScalarKind::String => Self::String(String::new()),
                ScalarKind::Int(_) => Self::Int(0),
                ScalarKind::Uint(_) => Self::Uint(0),
                ScalarKind::Float(_) => Self::Float(0.0),
                ScalarKind::Bool => Self::Bool(false),
            },
            TypeDescriptor::Domain(kind) => match kind {
                DomainKind::Date => Self::Date(Date::default()),
                DomainKind::Timestamp => Self::Timestamp(Timestamp::default()),
                DomainKind::ObjectId => Self::ObjectId(ObjectId::default()),
            },
            TypeDescriptor::Optional(_) => Self::Unset,
            TypeDescriptor::Array(_) => Self::Array(Vec::new()),
            TypeDescriptor::Alias { inner, .. } => Self::zero(inner),
        }
    }

    /// Returns a short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::String(_) => "string",
            Self::Int(_) => "signed integer",
            Self::Uint(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
            Self::ObjectId(_) => "identifier",
            Self::Array(_) => "array",
        }
    }

    /// Renders the value in its wire form, one string per occurrence.
    ///
    /// Unset values produce no occurrence; an unset element inside an array
    /// renders as an empty string.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        match self {
            Self::Unset => Vec::new(),
            Self::Array(items) => items
                .iter()
                .map(|item| item.render().into_iter().next().unwrap_or_default())
                .collect(),
            scalar => vec![scalar.to_string()],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::String(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Timestamp(t) => write!(f, "{t}"),
            Self::ObjectId(id) => write!(f, "{id}"),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// A [`Value`] that does not fit the field it was assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {found}")]
pub struct ValueMismatch {
    expected: &'static str,
    found: &'static str,
}

impl ValueMismatch {
    /// Creates a mismatch report.
    #[must_use]
    pub const fn new(expected: &'static str, found: &'static str) -> Self {
        Self { expected, found }
    }
}

/// A Rust type that can be the declared type of a bound field.
///
/// Implemented for strings, integers of every width up to 64 bits, floats,
/// booleans, the domain scalars, `Option<T>` and `Vec<T>`. Alias newtypes
/// get an implementation from `#[derive(BindAlias)]`.
pub trait FieldValue: Sized {
    /// Describes the declared type.
    fn descriptor() -> TypeDescriptor;

    /// Converts a coerced value into this type.
    fn from_value(value: Value) -> Result<Self, ValueMismatch>;

    /// Converts this value back for rendering.
    fn to_value(&self) -> Value;
}

impl FieldValue for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::String)
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(ValueMismatch::new("string", other.kind_name())),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::Bool)
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ValueMismatch::new("bool", other.kind_name())),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_signed {
    ($($ty:ty => $width:expr),* $(,)?) => {$(
        impl FieldValue for $ty {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::Scalar(ScalarKind::Int($width))
            }

            fn from_value(value: Value) -> Result<Self, ValueMismatch> {
                match value {
                    Value::Int(n) => <$ty>::try_from(n)
                        .map_err(|_| ValueMismatch::new(stringify!($ty), "out-of-range integer")),
                    other => Err(ValueMismatch::new(stringify!($ty), other.kind_name())),
                }
            }

            #[allow(clippy::cast_lossless, clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            fn to_value(&self) -> Value {
                Value::Int(*self as i64)
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty => $width:expr),* $(,)?) => {$(
        impl FieldValue for $ty {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::Scalar(ScalarKind::Uint($width))
            }

            fn from_value(value: Value) -> Result<Self, ValueMismatch> {
                match value {
                    Value::Uint(n) => <$ty>::try_from(n)
                        .map_err(|_| ValueMismatch::new(stringify!($ty), "out-of-range integer")),
                    other => Err(ValueMismatch::new(stringify!($ty), other.kind_name())),
                }
            }

            #[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
            fn to_value(&self) -> Value {
                Value::Uint(*self as u64)
            }
        }
    )*};
}

impl_signed!(
    i8 => IntWidth::W8,
    i16 => IntWidth::W16,
    i32 => IntWidth::W32,
    i64 => IntWidth::W64,
    isize => IntWidth::Size,
);

impl_unsigned!(
    u8 => IntWidth::W8,
    u16 => IntWidth::W16,
    u32 => IntWidth::W32,
    u64 => IntWidth::W64,
    usize => IntWidth::Size,
);

impl FieldValue for f64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::Float(FloatWidth::W64))
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Float(n) => Ok(n),
            other => Err(ValueMismatch::new("f64", other.kind_name())),
        }
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FieldValue for f32 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::Float(FloatWidth::W32))
    }

    // The engine parses f32 fields at f32 precision, so narrowing is exact.
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Float(n) => Ok(n as f32),
            other => Err(ValueMismatch::new("f32", other.kind_name())),
        }
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

macro_rules! impl_domain {
    ($($ty:ident => $kind:ident),* $(,)?) => {$(
        impl FieldValue for $ty {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::Domain(DomainKind::$kind)
            }

            fn from_value(value: Value) -> Result<Self, ValueMismatch> {
                match value {
                    Value::$kind(v) => Ok(v),
                    other => Err(ValueMismatch::new(stringify!($ty), other.kind_name())),
                }
            }

            fn to_value(&self) -> Value {
                Value::$kind(*self)
            }
        }
    )*};
}

impl_domain!(Date => Date, Timestamp => Timestamp, ObjectId => ObjectId);

impl<T: FieldValue> FieldValue for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::optional(T::descriptor())
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Unset => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Unset, FieldValue::to_value)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            Value::Unset => Ok(Vec::new()),
            other => Err(ValueMismatch::new("array", other.kind_name())),
        }
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_value).collect())
    }
}
