//! Scalar application settings with documented defaults.
//!
//! Stored under fixed keys next to the collections. Reads fail open to
//! the defaults; setters validate before writing.

use std::sync::Arc;

use crate::error::{Result, ValidationError};
use crate::store::{self, keys, RecordStore};

/// Reminder intervals the app offers, in minutes.
pub const HYDRATION_INTERVALS_MIN: [u32; 5] = [30, 60, 120, 180, 240];

/// Default reminder interval, in minutes.
pub const DEFAULT_HYDRATION_INTERVAL_MIN: u32 = 60;

/// Typed accessors over the stored scalar settings.
pub struct Settings {
    store: Arc<dyn RecordStore>,
}

impl Settings {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Whether hydration reminders are on. Defaults to true.
    pub fn hydration_enabled(&self) -> bool {
        store::load_bool(self.store.as_ref(), keys::HYDRATION_ENABLED, true)
    }

    pub fn set_hydration_enabled(&self, enabled: bool) -> Result<()> {
        store::put_bool(self.store.as_ref(), keys::HYDRATION_ENABLED, enabled)?;
        Ok(())
    }

    /// Reminder interval in minutes. Defaults to 60.
    pub fn hydration_interval_min(&self) -> u32 {
        store::load_u32(
            self.store.as_ref(),
            keys::HYDRATION_INTERVAL,
            DEFAULT_HYDRATION_INTERVAL_MIN,
        )
    }

    /// Sets the reminder interval.
    ///
    /// # Errors
    /// Rejects intervals outside [`HYDRATION_INTERVALS_MIN`]; nothing is
    /// written in that case.
    pub fn set_hydration_interval_min(&self, minutes: u32) -> Result<()> {
        if !HYDRATION_INTERVALS_MIN.contains(&minutes) {
            return Err(ValidationError::IntervalNotAllowed { minutes }.into());
        }
        store::put_u32(self.store.as_ref(), keys::HYDRATION_INTERVAL, minutes)?;
        Ok(())
    }

    /// Whether the onboarding carousel has been completed. Defaults to false.
    pub fn onboarding_completed(&self) -> bool {
        store::load_bool(self.store.as_ref(), keys::ONBOARDING_COMPLETED, false)
    }

    pub fn set_onboarding_completed(&self, completed: bool) -> Result<()> {
        store::put_bool(self.store.as_ref(), keys::ONBOARDING_COMPLETED, completed)?;
        Ok(())
    }
}
