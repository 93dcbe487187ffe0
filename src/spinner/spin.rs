//! Typed value domains.

/// A finite, totally ordered domain walked from a fixed first value.
///
/// `spin` returns the strictly next value, or `None` once the domain is
/// exhausted.
pub trait Spin: Sized {
    fn first() -> Self;

    fn spin(&self) -> Option<Self>;
}

impl Spin for bool {
    fn first() -> Self {
        false
    }

    fn spin(&self) -> Option<Self> {
        (!*self).then_some(true)
    }
}

macro_rules! integer_spin {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Spin for $ty {
                fn first() -> Self {
                    <$ty>::MIN
                }

                fn spin(&self) -> Option<Self> {
                    self.checked_add(1)
                }
            }
        )*
    };
}

integer_spin!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! float_spin {
    ($($ty:ty),* $(,)?) => {
        $(
            /// Walks every representable value from negative to positive
            /// infinity. NaN is the terminal sentinel and never spins.
            impl Spin for $ty {
                fn first() -> Self {
                    <$ty>::NEG_INFINITY
                }

                fn spin(&self) -> Option<Self> {
                    if self.is_nan() || *self == <$ty>::INFINITY {
                        return None;
                    }
                    let next = if *self == 0.0 {
                        <$ty>::from_bits(1)
                    } else if *self > 0.0 {
                        <$ty>::from_bits(self.to_bits() + 1)
                    } else {
                        <$ty>::from_bits(self.to_bits() - 1)
                    };
                    (!next.is_nan()).then_some(next)
                }
            }
        )*
    };
}

float_spin!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn walk<T: Spin + Clone>() -> Vec<T> {
        let mut values = vec![T::first()];
        while let Some(next) = values.last().and_then(Spin::spin) {
            values.push(next);
        }
        values
    }

    #[test]
    fn bool_walks_false_then_true() {
        assert_eq!(walk::<bool>(), vec![false, true]);
    }

    #[test]
    fn u8_covers_whole_domain() {
        let values = walk::<u8>();
        assert_eq!(values.len(), 256);
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values.last(), Some(&255));
    }

    #[test]
    fn i8_starts_at_min() {
        let values = walk::<i8>();
        assert_eq!(values.len(), 256);
        assert_eq!(values[0], -128);
        assert_eq!(values[128], 0);
    }

    #[test]
    fn floats_step_to_adjacent_values() {
        assert_eq!(f32::MAX.spin(), Some(f32::INFINITY));
        assert_eq!(f64::INFINITY.spin(), None);
        assert_eq!(f64::NAN.spin(), None);
        assert_eq!(0.0f64.spin(), Some(f64::from_bits(1)));
        assert_eq!((-f64::from_bits(1)).spin(), Some(-0.0));
        assert_eq!(f32::NEG_INFINITY.spin(), Some(f32::MIN));

        let one = 1.0f64;
        let next = one.spin().unwrap();
        assert!(next > one);
        assert_eq!(next.to_bits(), one.to_bits() + 1);
    }
}
