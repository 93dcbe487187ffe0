//! Enumerators over one property's domain.

use super::spin::Spin;
use crate::property::{FromProperty, Observable, PropertyValue};
use std::fmt;
use std::sync::Arc;

/// Function returning the value after the given one, or `None` when the
/// domain is exhausted.
pub type NextValue = Arc<dyn Fn(&PropertyValue) -> Option<PropertyValue> + Send + Sync>;

/// A deterministic, finite enumerator over one value domain.
///
/// # Example
///
/// ```rust
/// use ringlet_kripke::property::PropertyValue;
/// use ringlet_kripke::spinner::Spinner;
///
/// let values: Vec<_> = Spinner::bounded(2u8, 4u8).iter().collect();
///
/// assert_eq!(
///     values,
///     vec![
///         PropertyValue::UInt8(2),
///         PropertyValue::UInt8(3),
///         PropertyValue::UInt8(4),
///     ]
/// );
/// ```
#[derive(Clone)]
pub struct Spinner {
    start: PropertyValue,
    next: NextValue,
}

impl Spinner {
    pub fn new<F>(start: PropertyValue, next: F) -> Self
    where
        F: Fn(&PropertyValue) -> Option<PropertyValue> + Send + Sync + 'static,
    {
        Self {
            start,
            next: Arc::new(next),
        }
    }

    /// Spinner over the whole domain of `T`.
    pub fn of<T>() -> Self
    where
        T: Spin + Observable + FromProperty + 'static,
    {
        Self::new(T::first().observe(), |value| {
            T::from_property(value)?.spin().map(|next| next.observe())
        })
    }

    /// Spinner over the inclusive range `low..=high` of `T`.
    ///
    /// The starting value is always produced, so a reversed range with
    /// `low > high` yields `low` alone.
    pub fn bounded<T>(low: T, high: T) -> Self
    where
        T: Spin + Observable + FromProperty + PartialOrd + Send + Sync + 'static,
    {
        let start = low.observe();
        Self::new(start, move |value| {
            let current = T::from_property(value)?;
            if current >= high {
                return None;
            }
            current.spin().map(|next| next.observe())
        })
    }

    /// Spinner over a fixed set of values, in the given order.
    ///
    /// Repeated values keep their first position. An empty set behaves like
    /// an identity spinner over `Bool(false)`.
    pub fn values(candidates: impl IntoIterator<Item = PropertyValue>) -> Self {
        let mut values: Vec<PropertyValue> = Vec::new();
        for candidate in candidates {
            if !values.contains(&candidate) {
                values.push(candidate);
            }
        }
        let start = values
            .first()
            .cloned()
            .unwrap_or(PropertyValue::Bool(false));
        Self::new(start, move |value| {
            let position = values.iter().position(|candidate| candidate == value)?;
            values.get(position + 1).cloned()
        })
    }

    /// Spinner contributing exactly one value.
    pub fn identity(value: PropertyValue) -> Self {
        Self::new(value, |_| None)
    }

    pub fn start(&self) -> &PropertyValue {
        &self.start
    }

    pub fn next(&self, current: &PropertyValue) -> Option<PropertyValue> {
        (self.next)(current)
    }

    /// Iterate the whole domain, starting value first.
    pub fn iter(&self) -> SpinnerIter<'_> {
        SpinnerIter {
            spinner: self,
            current: None,
            done: false,
        }
    }
}

impl fmt::Debug for Spinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spinner")
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}

/// Iterator over a [`Spinner`]'s domain.
pub struct SpinnerIter<'a> {
    spinner: &'a Spinner,
    current: Option<PropertyValue>,
    done: bool,
}

impl Iterator for SpinnerIter<'_> {
    type Item = PropertyValue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = match &self.current {
            None => Some(self.spinner.start().clone()),
            Some(current) => self.spinner.next(current),
        };
        match &next {
            Some(value) => self.current = Some(value.clone()),
            None => self.done = true,
        }
        next
    }
}
