//! Observable properties.
//!
//! Everything the explorer compares or emits is expressed as a
//! [`PropertyList`]: a name-keyed map of typed [`PropertyValue`]s. Values are
//! produced through the [`Inspectable`] capability rather than runtime
//! reflection, and written back through [`Assignable`] when the explorer
//! spins external variables.

mod error;
mod extractor;
mod inspect;
mod list;
pub mod macros;
mod value;

pub use error::PropertyError;
pub use extractor::{ExtractedProperties, InspectingExtractor, PropertyExtractor};
pub use inspect::{
    properties_of, Assignable, Fields, FromProperty, Inspectable, Inspector, Observable,
};
pub use list::PropertyList;
pub use value::{PropertyType, PropertyValue};
