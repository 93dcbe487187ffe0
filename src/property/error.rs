//! Property access errors.

use super::value::PropertyType;
use thiserror::Error;

/// Errors that can occur when writing a property back into a value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PropertyError {
    #[error("No property named '{name}'")]
    UnknownField { name: String },

    #[error("Property '{name}' cannot hold a value of type {found}")]
    TypeMismatch { name: String, found: PropertyType },
}
