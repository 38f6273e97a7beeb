//! Static type descriptors.
//!
//! A [`TypeDescriptor`] describes the declared type of a bound field as a
//! closed tree: scalars and domain scalars at the leaves, wrapped by
//! optionals, arrays and named aliases. The coercion engine matches on this
//! tree exhaustively; nothing is discovered by reflection at decode time.

use std::fmt;

/// Bit width of an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// 8 bits
    W8,
    /// 16 bits
    W16,
    /// 32 bits
    W32,
    /// 64 bits
    W64,
    /// Platform pointer width (`isize` / `usize`)
    Size,
}

impl IntWidth {
    /// Returns the number of bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
            Self::Size => usize::BITS,
        }
    }

    /// Returns true if `n` fits a signed integer of this width.
    #[must_use]
    pub const fn fits_signed(self, n: i64) -> bool {
        let bits = self.bits();
        if bits >= 64 {
            return true;
        }
        let bound = 1i64 << (bits - 1);
        n >= -bound && n < bound
    }

    /// Returns true if `n` fits an unsigned integer of this width.
    #[must_use]
    pub const fn fits_unsigned(self, n: u64) -> bool {
        let bits = self.bits();
        bits >= 64 || n < (1u64 << bits)
    }
}

/// Bit width of a floating point type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    /// `f32`
    W32,
    /// `f64`
    W64,
}

/// Primitive scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// UTF-8 string
    String,
    /// Signed integer
    Int(IntWidth),
    /// Unsigned integer
    Uint(IntWidth),
    /// Floating point number
    Float(FloatWidth),
    /// Boolean
    Bool,
}

/// Domain scalar kinds with a fixed text representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// RFC 3339 timestamp
    Timestamp,
    /// 12-byte identifier as 24 hex characters
    ObjectId,
}

/// Declared type of a bound field.
///
/// # Example
///
/// ```rust
/// use bindery_extract::{FieldValue, TypeDescriptor, ScalarKind, IntWidth};
///
/// let ty = <Vec<Option<i32>> as FieldValue>::descriptor();
/// assert_eq!(
///     ty,
///     TypeDescriptor::array(TypeDescriptor::optional(TypeDescriptor::Scalar(ScalarKind::Int(IntWidth::W32))))
/// );
/// assert_eq!(ty.to_string(), "Array<Optional<i32>>");
/// assert!(ty.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A primitive scalar.
    Scalar(ScalarKind),
    /// A domain scalar.
    Domain(DomainKind),
    /// A value that may be absent.
    Optional(Box<TypeDescriptor>),
    /// Zero or more values.
    Array(Box<TypeDescriptor>),
    /// A distinct named type sharing the representation of `inner`.
    Alias {
        /// Name of the alias type.
        name: &'static str,
        /// The underlying representation.
        inner: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Wraps `inner` in an optional.
    #[must_use]
    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Wraps `inner` in an array.
    #[must_use]
    pub fn array(inner: TypeDescriptor) -> Self {
        Self::Array(Box::new(inner))
    }

    /// Names `inner` as an alias.
    #[must_use]
    pub fn alias(name: &'static str, inner: TypeDescriptor) -> Self {
        Self::Alias {
            name,
            inner: Box::new(inner),
        }
    }

    /// Strips aliases down to the underlying representation.
    #[must_use]
    pub fn unaliased(&self) -> &TypeDescriptor {
        match self {
            Self::Alias { inner, .. } => inner.unaliased(),
            other => other,
        }
    }

    /// Returns true for a (possibly aliased) string scalar.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self.unaliased(), Self::Scalar(ScalarKind::String))
    }

    /// Checks the shape rules the engine relies on.
    ///
    /// Rejected shapes: arrays nested anywhere inside arrays, optionals of
    /// optionals, and aliases of anything but scalars or domain scalars.
    pub fn validate(&self) -> Result<(), String> {
        self.validate_within(false)
    }

    fn validate_within(&self, in_array: bool) -> Result<(), String> {
        match self {
            Self::Scalar(_) | Self::Domain(_) => Ok(()),
            Self::Optional(inner) => {
                if matches!(inner.as_ref(), Self::Optional(_)) {
                    return Err(format!("nested optionals are not supported ({self})"));
                }
                inner.validate_within(in_array)
            }
            Self::Array(inner) => {
                if in_array {
                    return Err(format!("nested arrays are not supported ({self})"));
                }
                inner.validate_within(true)
            }
            Self::Alias { name, inner } => match inner.unaliased() {
                Self::Scalar(_) | Self::Domain(_) => Ok(()),
                _ => Err(format!(
                    "alias {name} must wrap a scalar or domain scalar, not {inner}"
                )),
            },
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => match kind {
                ScalarKind::String => f.write_str("string"),
                ScalarKind::Bool => f.write_str("bool"),
                ScalarKind::Int(IntWidth::Size) => f.write_str("isize"),
                ScalarKind::Uint(IntWidth::Size) => f.write_str("usize"),
                ScalarKind::Int(width) => write!(f, "i{}", width.bits()),
                ScalarKind::Uint(width) => write!(f, "u{}", width.bits()),
                ScalarKind::Float(FloatWidth::W32) => f.write_str("f32"),
                ScalarKind::Float(FloatWidth::W64) => f.write_str("f64"),
            },
            Self::Domain(DomainKind::Date) => f.write_str("date"),
            Self::Domain(DomainKind::Timestamp) => f.write_str("timestamp"),
            Self::Domain(DomainKind::ObjectId) => f.write_str("identifier"),
            Self::Optional(inner) => write!(f, "Optional<{inner}>"),
            Self::Array(inner) => write!(f, "Array<{inner}>"),
            Self::Alias { name, .. } => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(width: IntWidth) -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::Int(width))
    }

    #[test]
    fn test_signed_ranges() {
        assert!(IntWidth::W8.fits_signed(127));
        assert!(IntWidth::W8.fits_signed(-128));
        assert!(!IntWidth::W8.fits_signed(128));
        assert!(!IntWidth::W8.fits_signed(-129));
        assert!(IntWidth::W64.fits_signed(i64::MIN));
        assert!(IntWidth::W32.fits_signed(i64::from(i32::MAX)));
        assert!(!IntWidth::W32.fits_signed(i64::from(i32::MAX) + 1));
    }

    #[test]
    fn test_unsigned_ranges() {
        assert!(IntWidth::W16.fits_unsigned(65_535));
        assert!(!IntWidth::W16.fits_unsigned(65_536));
        assert!(IntWidth::W64.fits_unsigned(u64::MAX));
    }

    #[test]
    fn test_supported_shapes() {
        let shapes = [
            int(IntWidth::W64),
            TypeDescriptor::optional(int(IntWidth::W8)),
            TypeDescriptor::array(TypeDescriptor::optional(int(IntWidth::W8))),
            TypeDescriptor::array(TypeDescriptor::alias("Status", TypeDescriptor::Scalar(ScalarKind::String))),
            TypeDescriptor::optional(TypeDescriptor::array(TypeDescriptor::Domain(DomainKind::Date))),
            TypeDescriptor::alias(
                "Outer",
                TypeDescriptor::alias("Inner", TypeDescriptor::Domain(DomainKind::ObjectId)),
            ),
        ];
        for shape in shapes {
            assert!(shape.validate().is_ok(), "{shape} should be accepted");
        }
    }

    #[test]
    fn test_rejects_nested_arrays() {
        let nested = TypeDescriptor::array(TypeDescriptor::array(int(IntWidth::W32)));
        assert!(nested.validate().unwrap_err().contains("nested arrays"));

        let hidden = TypeDescriptor::array(TypeDescriptor::optional(TypeDescriptor::array(int(IntWidth::W32))));
        assert!(hidden.validate().is_err());
    }

    #[test]
    fn test_rejects_alias_of_array() {
        let alias = TypeDescriptor::alias("Ids", TypeDescriptor::array(int(IntWidth::W32)));
        assert!(alias.validate().unwrap_err().contains("Ids"));
    }

    #[test]
    fn test_rejects_double_optional() {
        let double = TypeDescriptor::optional(TypeDescriptor::optional(int(IntWidth::W32)));
        assert!(double.validate().is_err());
    }

    #[test]
    fn test_is_string_sees_through_aliases() {
        let alias = TypeDescriptor::alias("Name", TypeDescriptor::Scalar(ScalarKind::String));
        assert!(alias.is_string());
        assert!(!int(IntWidth::W8).is_string());
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeDescriptor::Scalar(ScalarKind::Uint(IntWidth::Size)).to_string(), "usize");
        assert_eq!(
            TypeDescriptor::optional(TypeDescriptor::Domain(DomainKind::Timestamp)).to_string(),
            "Optional<timestamp>"
        );
    }
}
