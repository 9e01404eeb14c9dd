//! Per-button press timer.
//!
//! `Idle` is a zero count, `Holding` any non-zero count. A press is
//! classified on the tick where the button is first seen released, using
//! the number of ticks it was seen pressed. That release tick is not part
//! of the duration.

use super::config::Thresholds;
use crate::Level;
use portable_atomic::{AtomicU16, Ordering};

/// Outcome of a completed press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    Short,
    Long,
}

pub struct PressTimer {
    held_ticks: AtomicU16,
}

impl PressTimer {
    pub const fn new() -> Self {
        Self {
            held_ticks: AtomicU16::new(0),
        }
    }

    /// Advance by one tick. Returns the classification when a press ends.
    ///
    /// Only the sampler context may call this.
    pub fn sample(&self, level: Level, thresholds: &Thresholds) -> Option<Press> {
        let held = self.held_ticks.load(Ordering::Relaxed);

        match level {
            Level::Pressed => {
                // Long threshold fits in u16, so saturating never changes the outcome.
                self.held_ticks
                    .store(held.saturating_add(1), Ordering::Relaxed);
                None
            }
            Level::Released if held == 0 => None,
            Level::Released => {
                self.held_ticks.store(0, Ordering::Relaxed);
                classify(held, thresholds)
            }
        }
    }

    pub fn held_ticks(&self) -> u16 {
        self.held_ticks.load(Ordering::Relaxed)
    }

    pub fn is_holding(&self) -> bool {
        self.held_ticks() > 0
    }

    pub fn reset(&self) {
        self.held_ticks.store(0, Ordering::Relaxed);
    }
}

impl Default for PressTimer {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(held: u16, thresholds: &Thresholds) -> Option<Press> {
    if held >= thresholds.long_ticks() {
        Some(Press::Long)
    } else if held >= thresholds.short_ticks() {
        Some(Press::Short)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold(timer: &PressTimer, thresholds: &Thresholds, ticks: u32) -> Option<Press> {
        for _ in 0..ticks {
            assert_eq!(timer.sample(Level::Pressed, thresholds), None);
        }
        timer.sample(Level::Released, thresholds)
    }

    #[test]
    fn release_tick_is_not_counted() {
        let thresholds = Thresholds::from_ticks(5, 100).unwrap();
        let timer = PressTimer::new();

        assert_eq!(hold(&timer, &thresholds, 4), None);
        assert_eq!(hold(&timer, &thresholds, 5), Some(Press::Short));
        assert_eq!(hold(&timer, &thresholds, 99), Some(Press::Short));
        assert_eq!(hold(&timer, &thresholds, 100), Some(Press::Long));
        assert!(!timer.is_holding());
    }

    #[test]
    fn idle_release_never_classifies() {
        let thresholds = Thresholds::from_ticks(0, 3).unwrap();
        let timer = PressTimer::new();

        for _ in 0..10 {
            assert_eq!(timer.sample(Level::Released, &thresholds), None);
        }
        assert_eq!(hold(&timer, &thresholds, 1), Some(Press::Short));
    }

    #[test]
    fn count_resets_between_bounces() {
        let thresholds = Thresholds::from_ticks(3, 10).unwrap();
        let timer = PressTimer::new();

        assert_eq!(hold(&timer, &thresholds, 2), None);
        assert_eq!(timer.held_ticks(), 0);
        assert_eq!(hold(&timer, &thresholds, 2), None);
        assert_eq!(timer.held_ticks(), 0);
    }

    #[test]
    fn counter_saturates_on_endless_hold() {
        let thresholds = Thresholds::from_ticks(5, u16::MAX).unwrap();
        let timer = PressTimer::new();

        assert_eq!(hold(&timer, &thresholds, u16::MAX as u32 + 1000), Some(Press::Long));
    }

    #[test]
    fn reset_returns_to_idle() {
        let thresholds = Thresholds::from_ticks(1, 2).unwrap();
        let timer = PressTimer::new();

        timer.sample(Level::Pressed, &thresholds);
        timer.sample(Level::Pressed, &thresholds);
        assert!(timer.is_holding());

        timer.reset();
        assert!(!timer.is_holding());
        assert_eq!(timer.sample(Level::Released, &thresholds), None);
    }
}
