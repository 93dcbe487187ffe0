//! Odometer-style composition of spinners.

use super::single::Spinner;
use crate::property::PropertyValue;

/// Enumerates the Cartesian product of several spinners.
///
/// Digit 0 varies fastest. When a digit is exhausted it is reset to its
/// starting value and the next digit advances; enumeration ends when the
/// last digit is exhausted. With no spinners exactly one (empty)
/// combination is produced.
///
/// # Example
///
/// ```rust
/// use ringlet_kripke::spinner::{MultiSpinner, Spinner};
///
/// let combinations = MultiSpinner::new(vec![
///     Spinner::of::<bool>(),
///     Spinner::bounded(0u8, 2u8),
/// ]);
///
/// assert_eq!(combinations.count(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct MultiSpinner {
    spinners: Vec<Spinner>,
    current: Option<Vec<PropertyValue>>,
    exhausted: bool,
}

impl MultiSpinner {
    pub fn new(spinners: Vec<Spinner>) -> Self {
        Self {
            spinners,
            current: None,
            exhausted: false,
        }
    }

    pub fn digits(&self) -> usize {
        self.spinners.len()
    }
}

impl Iterator for MultiSpinner {
    type Item = Vec<PropertyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let Some(values) = self.current.as_mut() else {
            let first: Vec<PropertyValue> =
                self.spinners.iter().map(|s| s.start().clone()).collect();
            self.current = Some(first.clone());
            return Some(first);
        };

        for (digit, spinner) in self.spinners.iter().enumerate() {
            match spinner.next(&values[digit]) {
                Some(value) => {
                    values[digit] = value;
                    return Some(values.clone());
                }
                None => values[digit] = spinner.start().clone(),
            }
        }

        self.exhausted = true;
        None
    }
}
