//! Selection of spinners per property.

use super::single::Spinner;
use crate::property::{PropertyType, PropertyValue};
use rustc_hash::FxHashMap;
use tracing::warn;

/// Maps properties to the spinner that enumerates them.
///
/// Lookup order for a property is: an override registered for its name,
/// then the spinner registered for its type, then an identity spinner over
/// the property's current value. The default registry knows every boolean,
/// integer and floating point type.
#[derive(Clone, Debug)]
pub struct SpinnerRegistry {
    by_type: FxHashMap<PropertyType, Spinner>,
    by_name: FxHashMap<String, Spinner>,
}

impl SpinnerRegistry {
    /// A registry without any spinners; every property is held fixed.
    pub fn empty() -> Self {
        Self {
            by_type: FxHashMap::default(),
            by_name: FxHashMap::default(),
        }
    }

    pub fn register_type(&mut self, property_type: PropertyType, spinner: Spinner) -> &mut Self {
        self.by_type.insert(property_type, spinner);
        self
    }

    /// Override the spinner of one named variable regardless of its type.
    pub fn register_variable(&mut self, name: impl Into<String>, spinner: Spinner) -> &mut Self {
        self.by_name.insert(name.into(), spinner);
        self
    }

    pub fn with_type(mut self, property_type: PropertyType, spinner: Spinner) -> Self {
        self.register_type(property_type, spinner);
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, spinner: Spinner) -> Self {
        self.register_variable(name, spinner);
        self
    }

    /// The spinner enumerating the property `name` whose current value is
    /// `value`.
    pub fn spinner_for(&self, name: &str, value: &PropertyValue) -> Spinner {
        if let Some(spinner) = self.by_name.get(name) {
            return spinner.clone();
        }

        let property_type = value.property_type();
        if let Some(spinner) = self.by_type.get(&property_type) {
            return spinner.clone();
        }

        if property_type.is_opaque() {
            warn!(
                property = name,
                property_type = %property_type,
                "No spinner for opaque property, holding it fixed"
            );
        }
        Spinner::identity(value.clone())
    }
}

impl Default for SpinnerRegistry {
    fn default() -> Self {
        Self::empty()
            .with_type(PropertyType::Bool, Spinner::of::<bool>())
            .with_type(PropertyType::Int8, Spinner::of::<i8>())
            .with_type(PropertyType::Int16, Spinner::of::<i16>())
            .with_type(PropertyType::Int32, Spinner::of::<i32>())
            .with_type(PropertyType::Int64, Spinner::of::<i64>())
            .with_type(PropertyType::UInt8, Spinner::of::<u8>())
            .with_type(PropertyType::UInt16, Spinner::of::<u16>())
            .with_type(PropertyType::UInt32, Spinner::of::<u32>())
            .with_type(PropertyType::UInt64, Spinner::of::<u64>())
            .with_type(PropertyType::Float, Spinner::of::<f32>())
            .with_type(PropertyType::Double, Spinner::of::<f64>())
    }
}
