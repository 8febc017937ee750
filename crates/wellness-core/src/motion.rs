//! Motion-sensing collaborators: shake detection and step progress.
//!
//! Both paths are best-effort. A missing sensor degrades to "no update";
//! nothing here can fail the host.

use uuid::Uuid;

use crate::error::Result;
use crate::habit::{Habit, HabitLedger};

/// Acceleration magnitude above which a sample counts as a shake.
pub const SHAKE_THRESHOLD: f32 = 15.0;
/// Minimum gap between two detected shakes.
pub const SHAKE_DEBOUNCE_MS: i64 = 1_000;

/// One accelerometer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Sample time, milliseconds since epoch.
    pub at_ms: i64,
}

impl MotionSample {
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Debounced shake detection over an accelerometer sample stream.
///
/// The host feeds samples and triggers the mood quick-entry when a shake
/// fires.
#[derive(Debug, Default)]
pub struct ShakeDetector {
    threshold: f32,
    last_shake_ms: Option<i64>,
}

impl ShakeDetector {
    pub fn new() -> Self {
        Self::with_threshold(SHAKE_THRESHOLD)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            last_shake_ms: None,
        }
    }

    /// Returns true when this sample completes a debounced shake.
    pub fn on_sample(&mut self, sample: MotionSample) -> bool {
        if sample.magnitude() <= self.threshold {
            return false;
        }
        if let Some(last) = self.last_shake_ms {
            if sample.at_ms - last <= SHAKE_DEBOUNCE_MS {
                return false;
            }
        }
        self.last_shake_ms = Some(sample.at_ms);
        true
    }
}

/// Step-count collaborator. `None` means the source is unavailable
/// (no sensor, no permission); the feature silently degrades.
pub trait StepSource {
    fn latest_steps(&mut self) -> Option<u32>;
}

/// Feeds the latest step reading into a habit's external progress.
///
/// Returns the updated habit, or `None` when the source is unavailable
/// or nothing changed.
pub fn sync_step_progress(
    source: &mut dyn StepSource,
    habits: &HabitLedger,
    habit_id: Uuid,
) -> Result<Option<Habit>> {
    match source.latest_steps() {
        Some(steps) => habits.apply_external_progress(habit_id, steps),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ChangeBus;
    use crate::store::SqliteStore;
    use std::sync::Arc;

    fn sample(magnitude: f32, at_ms: i64) -> MotionSample {
        MotionSample {
            x: magnitude,
            y: 0.0,
            z: 0.0,
            at_ms,
        }
    }

    #[test]
    fn test_below_threshold_never_fires() {
        let mut detector = ShakeDetector::new();
        assert!(!detector.on_sample(sample(9.8, 1_000)));
        assert!(!detector.on_sample(sample(15.0, 2_000)));
    }

    #[test]
    fn test_shake_fires_and_debounces() {
        let mut detector = ShakeDetector::new();
        assert!(detector.on_sample(sample(20.0, 1_000)));
        // Within a second of the last shake: suppressed.
        assert!(!detector.on_sample(sample(20.0, 1_500)));
        assert!(!detector.on_sample(sample(20.0, 2_000)));
        // Past the debounce window: fires again.
        assert!(detector.on_sample(sample(20.0, 2_100)));
    }

    #[test]
    fn test_magnitude_combines_axes() {
        let sample = MotionSample {
            x: 3.0,
            y: 4.0,
            z: 12.0,
            at_ms: 0,
        };
        assert_eq!(sample.magnitude(), 13.0);
    }

    struct FixedSteps(Option<u32>);

    impl StepSource for FixedSteps {
        fn latest_steps(&mut self) -> Option<u32> {
            self.0
        }
    }

    #[test]
    fn test_step_sync_updates_linked_habit() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let ledger = HabitLedger::new(store, ChangeBus::new());
        let habit = ledger.add("Walk", "", "🏃", 100).unwrap();

        let mut source = FixedSteps(Some(120));
        let updated = sync_step_progress(&mut source, &ledger, habit.id)
            .unwrap()
            .unwrap();
        assert_eq!(updated.current_count, 120);
        assert!(updated.is_completed);
    }

    #[test]
    fn test_missing_sensor_degrades_silently() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let ledger = HabitLedger::new(store, ChangeBus::new());
        let habit = ledger.add("Walk", "", "🏃", 100).unwrap();

        let mut source = FixedSteps(None);
        assert!(sync_step_progress(&mut source, &ledger, habit.id)
            .unwrap()
            .is_none());
        assert_eq!(ledger.list()[0].current_count, 0);
    }
}
