//! Typed property values and their type tags.

use super::list::PropertyList;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of a [`PropertyValue`].
///
/// `Opaque` carries the Rust type name of a value the extractor could not
/// interpret, so downstream consumers can detect reduced fidelity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    Text,
    Collection,
    Compound,
    Opaque(String),
}

impl PropertyType {
    /// Whether this tag marks an extraction gap.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int8 => f.write_str("i8"),
            Self::Int16 => f.write_str("i16"),
            Self::Int32 => f.write_str("i32"),
            Self::Int64 => f.write_str("i64"),
            Self::UInt8 => f.write_str("u8"),
            Self::UInt16 => f.write_str("u16"),
            Self::UInt32 => f.write_str("u32"),
            Self::UInt64 => f.write_str("u64"),
            Self::Float => f.write_str("f32"),
            Self::Double => f.write_str("f64"),
            Self::Text => f.write_str("text"),
            Self::Collection => f.write_str("collection"),
            Self::Compound => f.write_str("compound"),
            Self::Opaque(name) => write!(f, "opaque<{name}>"),
        }
    }
}

/// A single observed value.
///
/// Equality is structural. The [`Display`](fmt::Display) form is the
/// canonical representation used when fingerprinting worlds: it includes the
/// type tag of every scalar, so `UInt8(1)` and `Int8(1)` never collide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    Text(String),
    /// Ordered list of properties extracted from a collection.
    Collection(Vec<PropertyValue>),
    /// Named fields of a nested structured value.
    Compound(PropertyList),
    /// Value of a type the extractor does not understand.
    Opaque { type_name: String, repr: String },
}

impl PropertyValue {
    /// The type tag of this value.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Bool(_) => PropertyType::Bool,
            Self::Int8(_) => PropertyType::Int8,
            Self::Int16(_) => PropertyType::Int16,
            Self::Int32(_) => PropertyType::Int32,
            Self::Int64(_) => PropertyType::Int64,
            Self::UInt8(_) => PropertyType::UInt8,
            Self::UInt16(_) => PropertyType::UInt16,
            Self::UInt32(_) => PropertyType::UInt32,
            Self::UInt64(_) => PropertyType::UInt64,
            Self::Float(_) => PropertyType::Float,
            Self::Double(_) => PropertyType::Double,
            Self::Text(_) => PropertyType::Text,
            Self::Collection(_) => PropertyType::Collection,
            Self::Compound(_) => PropertyType::Compound,
            Self::Opaque { type_name, .. } => PropertyType::Opaque(type_name.clone()),
        }
    }

    /// Canonical string form, identical for structurally equal values.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&PropertyList> {
        match self {
            Self::Compound(list) => Some(list),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int8(value) => write!(f, "i8:{value}"),
            Self::Int16(value) => write!(f, "i16:{value}"),
            Self::Int32(value) => write!(f, "i32:{value}"),
            Self::Int64(value) => write!(f, "i64:{value}"),
            Self::UInt8(value) => write!(f, "u8:{value}"),
            Self::UInt16(value) => write!(f, "u16:{value}"),
            Self::UInt32(value) => write!(f, "u32:{value}"),
            Self::UInt64(value) => write!(f, "u64:{value}"),
            Self::Float(value) => write!(f, "f32:{value:?}"),
            Self::Double(value) => write!(f, "f64:{value:?}"),
            Self::Text(value) => write!(f, "{value:?}"),
            Self::Collection(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Compound(list) => write!(f, "{list}"),
            Self::Opaque { type_name, repr } => write!(f, "opaque<{type_name}>({repr:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tag_matches_variant() {
        assert_eq!(PropertyValue::Bool(true).property_type(), PropertyType::Bool);
        assert_eq!(PropertyValue::UInt16(3).property_type(), PropertyType::UInt16);
        assert_eq!(
            PropertyValue::Collection(vec![]).property_type(),
            PropertyType::Collection
        );
    }

    #[test]
    fn opaque_type_is_recorded_in_tag() {
        let value = PropertyValue::Opaque {
            type_name: "std::time::Instant".to_string(),
            repr: "Instant { .. }".to_string(),
        };
        let tag = value.property_type();

        assert!(tag.is_opaque());
        assert_eq!(tag.to_string(), "opaque<std::time::Instant>");
    }

    #[test]
    fn canonical_form_distinguishes_integer_widths() {
        assert_ne!(
            PropertyValue::UInt8(1).canonical(),
            PropertyValue::Int8(1).canonical()
        );
        assert_eq!(PropertyValue::Int32(-4).canonical(), "i32:-4");
    }

    #[test]
    fn canonical_form_of_collection_keeps_order() {
        let value = PropertyValue::Collection(vec![
            PropertyValue::Bool(false),
            PropertyValue::Text("a".to_string()),
        ]);

        assert_eq!(value.canonical(), "[false, \"a\"]");
    }

    #[test]
    fn float_canonical_form_is_exact() {
        assert_eq!(PropertyValue::Double(0.5).canonical(), "f64:0.5");
        assert_eq!(PropertyValue::Float(f32::NAN).canonical(), "f32:NaN");
    }
}
