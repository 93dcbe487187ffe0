//! Enumeration of external variable values.
//!
//! A [`Spinner`] walks one value domain deterministically from a fixed
//! starting value. A [`MultiSpinner`] composes several of them into an
//! odometer over their Cartesian product, and the [`SpinnerRegistry`]
//! decides which spinner enumerates which property.

pub mod multi;
pub mod registry;
pub mod single;
pub mod spin;

pub use multi::MultiSpinner;
pub use registry::SpinnerRegistry;
pub use single::{NextValue, Spinner, SpinnerIter};
pub use spin::Spin;
