//! Macros for declaring inspectable variable structs.

/// Declare a struct and implement `Inspectable` and `Assignable` for it.
///
/// Every field type must implement `Observable` and `FromProperty`.
///
/// # Example
///
/// ```
/// use ringlet_kripke::inspectable;
/// use ringlet_kripke::property::{properties_of, Assignable, PropertyValue};
///
/// inspectable! {
///     #[derive(Clone, Debug, Default)]
///     pub struct Inputs {
///         pub button_pushed: bool,
///         pub door_open: bool,
///     }
/// }
///
/// let mut inputs = Inputs::default();
/// inputs.assign("door_open", &PropertyValue::Bool(true)).unwrap();
///
/// let list = properties_of(&inputs);
/// assert_eq!(list.get("door_open"), Some(&PropertyValue::Bool(true)));
/// assert!(inputs.assign("door_open", &PropertyValue::UInt8(1)).is_err());
/// ```
#[macro_export]
macro_rules! inspectable {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty
            ),*
        }

        impl $crate::property::Inspectable for $name {
            #[allow(unused_variables)]
            fn inspect(&self, fields: &mut $crate::property::Fields<'_>) {
                $( fields.field(stringify!($field), &self.$field); )*
            }
        }

        impl $crate::property::Assignable for $name {
            #[allow(unused_variables)]
            fn assign(
                &mut self,
                name: &str,
                value: &$crate::property::PropertyValue,
            ) -> ::std::result::Result<(), $crate::property::PropertyError> {
                match name {
                    $(
                        stringify!($field) => {
                            self.$field = <$ty as $crate::property::FromProperty>::from_property(value)
                                .ok_or_else(|| $crate::property::PropertyError::TypeMismatch {
                                    name: name.to_string(),
                                    found: value.property_type(),
                                })?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::property::PropertyError::UnknownField {
                        name: name.to_string(),
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::property::{properties_of, Assignable, PropertyError, PropertyValue};

    inspectable! {
        #[derive(Clone, Debug, Default, PartialEq)]
        struct Gauges {
            pressure: u16,
            label: String,
            readings: Vec<i8>,
        }
    }

    #[test]
    fn inspectable_lists_every_field() {
        let gauges = Gauges {
            pressure: 12,
            label: "boiler".to_string(),
            readings: vec![-1, 2],
        };

        let list = properties_of(&gauges);

        assert_eq!(list.len(), 3);
        assert_eq!(list.get("pressure"), Some(&PropertyValue::UInt16(12)));
        assert_eq!(
            list.get("label"),
            Some(&PropertyValue::Text("boiler".to_string()))
        );
    }

    #[test]
    fn assign_writes_matching_field() {
        let mut gauges = Gauges::default();

        gauges
            .assign("pressure", &PropertyValue::UInt16(40))
            .unwrap();

        assert_eq!(gauges.pressure, 40);
    }

    #[test]
    fn assign_rejects_unknown_and_mismatched() {
        let mut gauges = Gauges::default();

        assert_eq!(
            gauges.assign("temperature", &PropertyValue::UInt16(1)),
            Err(PropertyError::UnknownField {
                name: "temperature".to_string()
            })
        );
        assert!(matches!(
            gauges.assign("pressure", &PropertyValue::Bool(true)),
            Err(PropertyError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn empty_struct_is_supported() {
        inspectable! {
            #[derive(Clone, Debug, Default)]
            pub struct Nothing {}
        }

        assert!(properties_of(&Nothing {}).is_empty());
        assert!(Nothing {}.assign("x", &PropertyValue::Bool(true)).is_err());
    }
}
