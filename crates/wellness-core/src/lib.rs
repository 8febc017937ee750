//! # Wellness Tracker Core Library
//!
//! Core business logic for the wellness tracker: habit, mood, and water
//! logging over a durable key-value record store, plus hydration reminder
//! scheduling and the PIN access gate. The GUI host is a thin layer over
//! this crate; nothing here renders or navigates.
//!
//! ## Architecture
//!
//! - **Record Store**: SQLite-backed key-value persistence of the three
//!   collections and the scalar settings, injected as a capability into
//!   every component
//! - **Ledgers**: whole-collection CRUD with validation; mutations emit
//!   change events that display collaborators subscribe to
//! - **Reminder Scheduler**: at most one recurring tokio task posting the
//!   hydration notification through a host-supplied sink
//! - **Access Gate**: the PIN state machine gating entry
//!
//! ## Key Components
//!
//! - [`SqliteStore`]: the durable [`RecordStore`] implementation
//! - [`HabitLedger`], [`MoodLedger`], [`HydrationCounter`]: the data core
//! - [`ReminderScheduler`]: recurring reminders with replace semantics
//! - [`AccessGate`]: PIN set/verify
//! - [`ChangeBus`]: mutation fan-out for widgets and dashboards

pub mod error;
pub mod events;
pub mod gate;
pub mod habit;
pub mod hydration;
pub mod mood;
pub mod motion;
pub mod reminder;
pub mod settings;
pub mod store;

pub use error::{CoreError, Result, ScheduleError, StoreError, ValidationError};
pub use events::{ChangeBus, ChangeEvent};
pub use gate::{AccessGate, GateState};
pub use habit::{CompletionRatio, Habit, HabitLedger};
pub use hydration::HydrationCounter;
pub use mood::{MoodEntry, MoodLedger, SortOrder};
pub use motion::{MotionSample, ShakeDetector, StepSource};
pub use reminder::{NotificationSink, ReminderScheduler};
pub use settings::Settings;
pub use store::{RecordStore, SqliteStore};
