//! Daily water-intake counter.
//!
//! A single integer counter against a per-day glass goal. There is no
//! automatic reset at the day boundary; the host calls [`HydrationCounter::reset`]
//! explicitly.

use std::sync::Arc;

use crate::error::Result;
use crate::events::{ChangeBus, ChangeEvent};
use crate::store::{self, keys, RecordStore};

/// Default daily goal, in glasses.
pub const DAILY_WATER_GOAL: u32 = 8;
/// Milliliters per glass, for display text.
pub const ML_PER_GLASS: u32 = 250;

/// Increment/reset counter over the stored daily water count.
pub struct HydrationCounter {
    store: Arc<dyn RecordStore>,
    bus: ChangeBus,
    goal: u32,
}

impl HydrationCounter {
    pub fn new(store: Arc<dyn RecordStore>, bus: ChangeBus) -> Self {
        Self::with_goal(store, bus, DAILY_WATER_GOAL)
    }

    /// Counter with a non-default goal.
    pub fn with_goal(store: Arc<dyn RecordStore>, bus: ChangeBus, goal: u32) -> Self {
        Self { store, bus, goal }
    }

    /// Glasses logged today. Missing or corrupt data reads as zero.
    pub fn count(&self) -> u32 {
        store::load_u32(self.store.as_ref(), keys::DAILY_WATER_COUNT, 0)
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    /// Logs one glass and returns the new count, or `None` once the goal
    /// is already reached (the increment is a no-op there).
    pub fn log_glass(&self) -> Result<Option<u32>> {
        let count = self.count();
        if count >= self.goal {
            return Ok(None);
        }
        let count = count + 1;
        store::put_u32(self.store.as_ref(), keys::DAILY_WATER_COUNT, count)?;
        self.bus.emit(ChangeEvent::WaterLogged { count });
        Ok(Some(count))
    }

    /// Sets the count back to zero; intended to run once per day.
    pub fn reset(&self) -> Result<()> {
        store::put_u32(self.store.as_ref(), keys::DAILY_WATER_COUNT, 0)?;
        self.bus.emit(ChangeEvent::WaterReset);
        Ok(())
    }

    pub fn goal_reached(&self) -> bool {
        self.count() >= self.goal
    }

    /// `round(count / goal * 100)`.
    pub fn percentage(&self) -> u32 {
        if self.goal == 0 {
            return 0;
        }
        (f64::from(self.count()) / f64::from(self.goal) * 100.0).round() as u32
    }

    /// Display line, e.g. `"5/8 glasses (1250ml)"`.
    pub fn summary_line(&self) -> String {
        let count = self.count();
        format!(
            "{}/{} glasses ({}ml)",
            count,
            self.goal,
            count * ML_PER_GLASS
        )
    }
}
