//! Constant-memory detection by periodic checkpointing.

use super::CycleDetector;
use serde::{Deserialize, Serialize};

/// State of a [`PeriodicCycleDetector`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint<E> {
    /// The element every new element is compared against.
    pub checkpoint: Option<E>,
    /// Number of steps before the checkpoint is replaced.
    pub period: usize,
    /// Steps taken since the checkpoint was last replaced.
    pub steps: usize,
}

/// Compares each element with a single checkpoint that is replaced, and its
/// period doubled, whenever `period` elements have passed without a match.
///
/// On a sequence that eventually repeats with period `p`, a repeat is
/// reported once the period has grown to at least `p`. Elements that recur
/// out of that rhythm are not recognised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodicCycleDetector {
    initial_period: usize,
}

impl PeriodicCycleDetector {
    /// Detector starting with `initial_period`, clamped to at least one.
    pub fn new(initial_period: usize) -> Self {
        Self {
            initial_period: initial_period.max(1),
        }
    }

    pub fn initial_period(&self) -> usize {
        self.initial_period
    }
}

impl Default for PeriodicCycleDetector {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<E: Clone + PartialEq> CycleDetector<E> for PeriodicCycleDetector {
    type Data = Checkpoint<E>;

    fn initial_data(&self) -> Self::Data {
        Checkpoint {
            checkpoint: None,
            period: self.initial_period,
            steps: 0,
        }
    }

    fn in_cycle(&self, mut data: Self::Data, element: &E) -> (bool, Self::Data) {
        match data.checkpoint.as_ref().map(|checkpoint| checkpoint == element) {
            None => {
                data.checkpoint = Some(element.clone());
                (false, data)
            }
            Some(true) => (true, data),
            Some(false) => {
                data.steps += 1;
                if data.steps >= data.period {
                    data.checkpoint = Some(element.clone());
                    data.period = data.period.saturating_mul(2);
                    data.steps = 0;
                }
                (false, data)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_repeat(detector: &PeriodicCycleDetector, sequence: &[u32]) -> Option<usize> {
        let mut data = CycleDetector::<u32>::initial_data(detector);
        for (index, element) in sequence.iter().enumerate() {
            let (seen, next) = detector.in_cycle(data, element);
            if seen {
                return Some(index);
            }
            data = next;
        }
        None
    }

    #[test]
    fn fixed_point_is_detected_immediately() {
        let detector = PeriodicCycleDetector::default();

        assert_eq!(first_repeat(&detector, &[7, 7, 7]), Some(1));
    }

    #[test]
    fn eventually_periodic_sequence_is_detected() {
        let detector = PeriodicCycleDetector::default();
        let sequence: Vec<u32> = (0..3).chain([3, 4, 5].iter().copied().cycle().take(30)).collect();

        let index = first_repeat(&detector, &sequence).unwrap();
        assert!(index > 3);
        assert!(index < sequence.len());
    }

    #[test]
    fn distinct_elements_are_never_reported() {
        let detector = PeriodicCycleDetector::new(2);
        let sequence: Vec<u32> = (0..100).collect();

        assert_eq!(first_repeat(&detector, &sequence), None);
    }

    #[test]
    fn period_doubles_when_checkpoint_moves() {
        let detector = PeriodicCycleDetector::new(2);
        let data = detector.initial_data();

        let (_, data) = detector.in_cycle(data, &1u32);
        let (_, data) = detector.in_cycle(data, &2);
        assert_eq!(data.checkpoint, Some(1));
        assert_eq!(data.steps, 1);

        let (_, data) = detector.in_cycle(data, &3);
        assert_eq!(data.checkpoint, Some(3));
        assert_eq!(data.period, 4);
        assert_eq!(data.steps, 0);
    }

    #[test]
    fn zero_period_is_clamped() {
        assert_eq!(PeriodicCycleDetector::new(0).initial_period(), 1);
    }
}
