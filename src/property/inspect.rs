//! The `Inspectable` capability.
//!
//! Types list their own observable fields instead of being reflected at
//! runtime. Scalars, strings and vectors are observed directly through
//! [`Observable`]; nested structures become compound properties; shared
//! values are guarded so cyclic object graphs terminate.

use super::error::PropertyError;
use super::list::PropertyList;
use super::value::PropertyValue;
use rustc_hash::FxHashSet;
use std::any::TypeId;
use std::fmt::Debug;

/// A value that can enumerate its own named, typed fields.
///
/// # Example
///
/// ```rust
/// use ringlet_kripke::property::{properties_of, Fields, Inspectable, PropertyValue};
///
/// struct Door {
///     open: bool,
///     cycles: u8,
/// }
///
/// impl Inspectable for Door {
///     fn inspect(&self, fields: &mut Fields<'_>) {
///         fields.field("open", &self.open).field("cycles", &self.cycles);
///     }
/// }
///
/// let list = properties_of(&Door { open: true, cycles: 2 });
/// assert_eq!(list.get("open"), Some(&PropertyValue::Bool(true)));
/// assert_eq!(list.get("cycles"), Some(&PropertyValue::UInt8(2)));
/// ```
pub trait Inspectable {
    fn inspect(&self, fields: &mut Fields<'_>);
}

/// A value that writes properties back into its named fields.
pub trait Assignable {
    fn assign(&mut self, name: &str, value: &PropertyValue) -> Result<(), PropertyError>;
}

/// Leaf values that map directly onto a [`PropertyValue`].
pub trait Observable {
    fn observe(&self) -> PropertyValue;
}

/// Conversion back from a [`PropertyValue`].
pub trait FromProperty: Sized {
    fn from_property(value: &PropertyValue) -> Option<Self>;
}

macro_rules! primitive_property {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Observable for $ty {
                fn observe(&self) -> PropertyValue {
                    PropertyValue::$variant(*self)
                }
            }

            impl FromProperty for $ty {
                fn from_property(value: &PropertyValue) -> Option<Self> {
                    match value {
                        PropertyValue::$variant(inner) => Some(*inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

primitive_property! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
}

impl Observable for String {
    fn observe(&self) -> PropertyValue {
        PropertyValue::Text(self.clone())
    }
}

impl Observable for str {
    fn observe(&self) -> PropertyValue {
        PropertyValue::Text(self.to_string())
    }
}

impl FromProperty for String {
    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl<T: Observable> Observable for [T] {
    fn observe(&self) -> PropertyValue {
        PropertyValue::Collection(self.iter().map(Observable::observe).collect())
    }
}

impl<T: Observable> Observable for Vec<T> {
    fn observe(&self) -> PropertyValue {
        self.as_slice().observe()
    }
}

impl<T: FromProperty> FromProperty for Vec<T> {
    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Collection(items) => items.iter().map(T::from_property).collect(),
            _ => None,
        }
    }
}

impl Inspectable for () {
    fn inspect(&self, _fields: &mut Fields<'_>) {}
}

impl Assignable for () {
    fn assign(&mut self, name: &str, _value: &PropertyValue) -> Result<(), PropertyError> {
        Err(PropertyError::UnknownField {
            name: name.to_string(),
        })
    }
}

/// Walks [`Inspectable`] values, remembering shared values already visited.
///
/// A value is identified by its address together with its type, since a
/// structure and its first field share an address.
#[derive(Debug, Default)]
pub struct Inspector {
    visited: FxHashSet<(usize, TypeId)>,
}

impl Inspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the fields of `value`.
    pub fn inspect<T: Inspectable + ?Sized>(&mut self, value: &T) -> PropertyList {
        let mut fields = Fields {
            inspector: self,
            list: PropertyList::new(),
        };
        value.inspect(&mut fields);
        fields.list
    }

    fn visit<T: ?Sized + 'static>(&mut self, value: &T) -> bool {
        let address = value as *const T as *const () as usize;
        self.visited.insert((address, TypeId::of::<T>()))
    }
}

/// Extract the property list of a single value with a fresh [`Inspector`].
pub fn properties_of<T: Inspectable + ?Sized>(value: &T) -> PropertyList {
    Inspector::new().inspect(value)
}

/// Field sink handed to [`Inspectable::inspect`].
pub struct Fields<'a> {
    inspector: &'a mut Inspector,
    list: PropertyList,
}

impl<'a> Fields<'a> {
    /// Record a leaf field.
    pub fn field<V: Observable + ?Sized>(&mut self, name: &str, value: &V) -> &mut Self {
        self.list.insert(name, value.observe());
        self
    }

    /// Record a nested structure as a compound property.
    pub fn nested<T: Inspectable + ?Sized>(&mut self, name: &str, value: &T) -> &mut Self {
        let nested = self.inspector.inspect(value);
        self.list.insert(name, PropertyValue::Compound(nested));
        self
    }

    /// Record a collection of structures as an ordered list of compounds.
    pub fn nested_list<'v, T, I>(&mut self, name: &str, items: I) -> &mut Self
    where
        T: Inspectable + 'v,
        I: IntoIterator<Item = &'v T>,
    {
        let items = items
            .into_iter()
            .map(|item| PropertyValue::Compound(self.inspector.inspect(item)))
            .collect();
        self.list.insert(name, PropertyValue::Collection(items));
        self
    }

    /// Record a value that may be reachable through several paths.
    ///
    /// A value already visited during this extraction is emitted as an empty
    /// compound instead of being walked again.
    pub fn shared<T>(&mut self, name: &str, value: &T) -> &mut Self
    where
        T: Inspectable + ?Sized + 'static,
    {
        let property = if self.inspector.visit(value) {
            PropertyValue::Compound(self.inspector.inspect(value))
        } else {
            PropertyValue::Compound(PropertyList::new())
        };
        self.list.insert(name, property);
        self
    }

    /// Record a value the extractor cannot interpret.
    pub fn opaque<T: Debug + ?Sized>(&mut self, name: &str, value: &T) -> &mut Self {
        self.list.insert(
            name,
            PropertyValue::Opaque {
                type_name: std::any::type_name::<T>().to_string(),
                repr: format!("{value:?}"),
            },
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Point {
        x: i32,
        y: i32,
    }

    impl Inspectable for Point {
        fn inspect(&self, fields: &mut Fields<'_>) {
            fields.field("x", &self.x).field("y", &self.y);
        }
    }

    struct Shape {
        name: String,
        origin: Point,
        corners: Vec<Point>,
        tags: Vec<u8>,
    }

    impl Inspectable for Shape {
        fn inspect(&self, fields: &mut Fields<'_>) {
            fields
                .field("name", &self.name)
                .nested("origin", &self.origin)
                .nested_list("corners", &self.corners)
                .field("tags", &self.tags);
        }
    }

    struct Link {
        value: u8,
        next: RefCell<Option<Rc<Link>>>,
    }

    impl Inspectable for Link {
        fn inspect(&self, fields: &mut Fields<'_>) {
            fields.field("value", &self.value);
            if let Some(next) = self.next.borrow().as_ref() {
                fields.shared("next", next.as_ref());
            }
        }
    }

    #[test]
    fn nested_values_become_compounds() {
        let shape = Shape {
            name: "square".to_string(),
            origin: Point { x: 0, y: 1 },
            corners: vec![Point { x: 1, y: 1 }, Point { x: 2, y: 2 }],
            tags: vec![3, 4],
        };

        let list = properties_of(&shape);

        let origin = list.get("origin").and_then(PropertyValue::as_compound).unwrap();
        assert_eq!(origin.get("y"), Some(&PropertyValue::Int32(1)));
        match list.get("corners") {
            Some(PropertyValue::Collection(items)) => assert_eq!(items.len(), 2),
            other => panic!("Expected collection, got {other:?}"),
        }
        assert_eq!(
            list.get("tags"),
            Some(&PropertyValue::Collection(vec![
                PropertyValue::UInt8(3),
                PropertyValue::UInt8(4)
            ]))
        );
    }

    #[test]
    fn cyclic_graphs_terminate_with_placeholder() {
        let first = Rc::new(Link {
            value: 1,
            next: RefCell::new(None),
        });
        let second = Rc::new(Link {
            value: 2,
            next: RefCell::new(Some(Rc::clone(&first))),
        });
        *first.next.borrow_mut() = Some(Rc::clone(&second));

        let mut inspector = Inspector::new();
        let mut root = Fields {
            inspector: &mut inspector,
            list: PropertyList::new(),
        };
        root.shared("head", first.as_ref());
        let list = root.list;

        let head = list.get("head").and_then(PropertyValue::as_compound).unwrap();
        let next = head.get("next").and_then(PropertyValue::as_compound).unwrap();
        assert_eq!(next.get("value"), Some(&PropertyValue::UInt8(2)));
        let back = next.get("next").and_then(PropertyValue::as_compound).unwrap();
        assert!(back.is_empty());

        // Break the cycle so the test does not leak.
        first.next.borrow_mut().take();
    }

    struct Inner {
        a: u8,
    }

    impl Inspectable for Inner {
        fn inspect(&self, fields: &mut Fields<'_>) {
            fields.field("a", &self.a);
        }
    }

    #[repr(C)]
    struct Outer {
        inner: Inner,
        b: u8,
    }

    impl Inspectable for Outer {
        fn inspect(&self, fields: &mut Fields<'_>) {
            fields.shared("inner", &self.inner).field("b", &self.b);
        }
    }

    #[repr(C)]
    struct Root {
        outer: Outer,
    }

    impl Inspectable for Root {
        fn inspect(&self, fields: &mut Fields<'_>) {
            fields.shared("outer", &self.outer);
        }
    }

    #[test]
    fn shared_field_at_parent_address_is_walked() {
        let root = Root {
            outer: Outer {
                inner: Inner { a: 7 },
                b: 1,
            },
        };
        let list = properties_of(&root);

        let outer = list.get("outer").and_then(PropertyValue::as_compound).unwrap();
        let inner = outer.get("inner").and_then(PropertyValue::as_compound).unwrap();
        assert_eq!(inner.get("a"), Some(&PropertyValue::UInt8(7)));
        assert_eq!(outer.get("b"), Some(&PropertyValue::UInt8(1)));
    }

    #[test]
    fn opaque_fields_record_type_name() {
        struct Wrapper(std::time::Duration);

        impl Inspectable for Wrapper {
            fn inspect(&self, fields: &mut Fields<'_>) {
                fields.opaque("elapsed", &self.0);
            }
        }

        let list = properties_of(&Wrapper(std::time::Duration::from_secs(1)));
        let tag = list.get("elapsed").unwrap().property_type();

        assert!(tag.is_opaque());
        assert!(tag.to_string().contains("Duration"));
    }

    #[test]
    fn from_property_rejects_wrong_type() {
        assert_eq!(bool::from_property(&PropertyValue::Bool(true)), Some(true));
        assert_eq!(u8::from_property(&PropertyValue::Bool(true)), None);
        assert_eq!(
            Vec::<u8>::from_property(&PropertyValue::Collection(vec![PropertyValue::UInt8(9)])),
            Some(vec![9])
        );
    }

    #[test]
    fn unit_has_no_fields() {
        assert!(properties_of(&()).is_empty());
        assert!(().assign("anything", &PropertyValue::Bool(true)).is_err());
    }
}
