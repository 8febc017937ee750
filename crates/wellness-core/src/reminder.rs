//! Recurring hydration reminder scheduling.
//!
//! The scheduler owns at most one recurring task at a time; re-scheduling
//! replaces the previous cadence rather than stacking a second one. The
//! fired task posts a notification and returns — there is no in-flight
//! work for `cancel` to interrupt.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::error::ScheduleError;
use crate::settings::Settings;

pub const REMINDER_TITLE: &str = "Stay Hydrated!";
pub const REMINDER_BODY: &str = "Time to drink some water and stay refreshed.";

/// Notification-issuing collaborator. Channel setup and permission
/// handling are the host's concern; the sink just posts title and body.
pub trait NotificationSink: Send + Sync + 'static {
    fn post(&self, title: &str, body: &str);
}

struct ActiveReminder {
    interval_min: u32,
    handle: JoinHandle<()>,
}

/// Schedules and cancels the recurring hydration reminder.
///
/// Must be used from within a tokio runtime; the reminder runs as a
/// spawned task, independent of ledger mutations.
pub struct ReminderScheduler {
    sink: Arc<dyn NotificationSink>,
    active: Option<ActiveReminder>,
}

impl ReminderScheduler {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink, active: None }
    }

    /// Starts (or replaces) the recurring reminder at the given interval.
    /// The first reminder fires one full interval from now.
    ///
    /// # Errors
    /// A zero interval is rejected; the call is a no-op and any existing
    /// schedule keeps running.
    pub fn schedule(&mut self, interval_min: u32) -> Result<(), ScheduleError> {
        if interval_min == 0 {
            return Err(ScheduleError::InvalidInterval {
                minutes: interval_min,
            });
        }
        let period = Duration::from_secs(u64::from(interval_min) * 60);
        self.spawn(interval_min, period);
        Ok(())
    }

    /// Stops the reminder. Idempotent when nothing is scheduled.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            active.handle.abort();
        }
    }

    /// Interval of the active schedule, if any.
    pub fn active_interval_min(&self) -> Option<u32> {
        self.active.as_ref().map(|a| a.interval_min)
    }

    /// Wires the scheduler to the stored settings: schedule at the stored
    /// interval when reminders are enabled, cancel otherwise.
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<(), ScheduleError> {
        if settings.hydration_enabled() {
            self.schedule(settings.hydration_interval_min())
        } else {
            self.cancel();
            Ok(())
        }
    }

    fn spawn(&mut self, interval_min: u32, period: Duration) {
        self.cancel();
        let sink = Arc::clone(&self.sink);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately; skip it so the first
            // reminder lands one full period out.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                sink.post(REMINDER_TITLE, REMINDER_BODY);
            }
        });
        self.active = Some(ActiveReminder {
            interval_min,
            handle,
        });
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct CountingSink {
        fired: AtomicU32,
    }

    impl NotificationSink for CountingSink {
        fn post(&self, title: &str, body: &str) {
            assert_eq!(title, REMINDER_TITLE);
            assert_eq!(body, REMINDER_BODY);
            self.fired.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn scheduler() -> (ReminderScheduler, Arc<CountingSink>) {
        let sink = Arc::new(CountingSink::default());
        let scheduler = ReminderScheduler::new(Arc::clone(&sink) as Arc<dyn NotificationSink>);
        (scheduler, sink)
    }

    #[tokio::test]
    async fn test_zero_interval_is_rejected() {
        let (mut scheduler, sink) = scheduler();
        assert_eq!(
            scheduler.schedule(0),
            Err(ScheduleError::InvalidInterval { minutes: 0 })
        );
        assert_eq!(scheduler.active_interval_min(), None);
        assert_eq!(sink.fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reschedule_replaces_prior_schedule() {
        let (mut scheduler, _sink) = scheduler();
        scheduler.schedule(30).unwrap();
        scheduler.schedule(60).unwrap();
        assert_eq!(scheduler.active_interval_min(), Some(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reminder_fires_each_period() {
        let (mut scheduler, sink) = scheduler();
        scheduler.spawn(1, Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(50)).await;
        let fired = sink.fired.load(Ordering::SeqCst);
        assert!((2..=3).contains(&fired), "fired {fired} times");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_firing() {
        let (mut scheduler, sink) = scheduler();
        scheduler.spawn(1, Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(30)).await;

        scheduler.cancel();
        assert_eq!(scheduler.active_interval_min(), None);
        let fired = sink.fired.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(sink.fired.load(Ordering::SeqCst), fired);

        // Idempotent with nothing scheduled.
        scheduler.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_replacement_drops_the_old_cadence() {
        let (mut scheduler, sink) = scheduler();
        scheduler.spawn(1, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(25)).await;
        let before = sink.fired.load(Ordering::SeqCst);
        assert!(before >= 2);

        // Replace with a much slower cadence; the old task must stop.
        scheduler.spawn(2, Duration::from_secs(3600));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(sink.fired.load(Ordering::SeqCst), before);
        assert_eq!(scheduler.active_interval_min(), Some(2));
    }

    #[tokio::test]
    async fn test_apply_settings_follows_enabled_flag() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let settings = Settings::new(store);
        let (mut scheduler, _sink) = scheduler();

        settings.set_hydration_interval_min(120).unwrap();
        scheduler.apply_settings(&settings).unwrap();
        assert_eq!(scheduler.active_interval_min(), Some(120));

        settings.set_hydration_enabled(false).unwrap();
        scheduler.apply_settings(&settings).unwrap();
        assert_eq!(scheduler.active_interval_min(), None);
    }
}
