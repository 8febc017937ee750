//! Habit ledger: CRUD and completion tracking over the habit collection.
//!
//! Habits are persisted as a whole collection on every mutation; there are
//! no partial updates. Completion is checked with a threshold comparison
//! (`current_count >= target_count`) because external progress sources can
//! push the count past the target.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};
use crate::events::{ChangeBus, ChangeEvent};
use crate::store::{self, keys, RecordStore};

/// Minimum habit name length after trimming.
pub const HABIT_NAME_MIN: usize = 2;
/// Maximum habit name length.
pub const HABIT_NAME_MAX: usize = 50;

/// A user-defined recurring goal with a target count and completion state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Short emoji or glyph shown next to the habit.
    pub icon: String,
    pub target_count: u32,
    pub current_count: u32,
    pub is_completed: bool,
}

/// Completion statistics over the whole habit collection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionRatio {
    pub completed: u32,
    pub total: u32,
    /// `floor(completed * 100 / total)`, 0 when there are no habits.
    pub percentage: u32,
}

/// CRUD and completion-toggle operations over the habit collection.
pub struct HabitLedger {
    store: Arc<dyn RecordStore>,
    bus: ChangeBus,
}

impl HabitLedger {
    pub fn new(store: Arc<dyn RecordStore>, bus: ChangeBus) -> Self {
        Self { store, bus }
    }

    /// Returns all habits in store order. Missing or corrupt data reads
    /// as an empty collection.
    pub fn list(&self) -> Vec<Habit> {
        store::load_collection(self.store.as_ref(), keys::HABITS)
    }

    /// Validates the input, appends a fresh habit, and persists.
    ///
    /// # Errors
    /// Returns a validation error for a bad name or target count; nothing
    /// is persisted in that case.
    pub fn add(
        &self,
        name: &str,
        description: &str,
        icon: &str,
        target_count: u32,
    ) -> Result<Habit> {
        let name = validate_name(name)?;
        validate_target(target_count)?;

        let habit = Habit {
            id: Uuid::new_v4(),
            name,
            description: description.to_string(),
            icon: icon.to_string(),
            target_count,
            current_count: 0,
            is_completed: false,
        };

        let mut habits = self.list();
        habits.push(habit.clone());
        self.persist(&habits)?;
        self.bus.emit(ChangeEvent::HabitAdded { id: habit.id });
        Ok(habit)
    }

    /// Replaces the editable fields of an existing habit in place.
    /// Progress (`current_count`, `is_completed`) is untouched.
    ///
    /// # Errors
    /// Validation errors for bad input; `NotFound` if the id is absent.
    pub fn edit(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
        icon: &str,
        target_count: u32,
    ) -> Result<Habit> {
        let name = validate_name(name)?;
        validate_target(target_count)?;

        let mut habits = self.list();
        let habit = habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(CoreError::NotFound { what: "habit", id })?;

        habit.name = name;
        habit.description = description.to_string();
        habit.icon = icon.to_string();
        habit.target_count = target_count;
        let updated = habit.clone();

        self.persist(&habits)?;
        self.bus.emit(ChangeEvent::HabitEdited { id });
        Ok(updated)
    }

    /// Flips the completion flag. Becoming complete sets the count to the
    /// target; becoming incomplete resets it to zero.
    ///
    /// # Errors
    /// `NotFound` if the id is absent.
    pub fn toggle_completion(&self, id: Uuid) -> Result<Habit> {
        let mut habits = self.list();
        let habit = habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(CoreError::NotFound { what: "habit", id })?;

        habit.is_completed = !habit.is_completed;
        habit.current_count = if habit.is_completed {
            habit.target_count
        } else {
            0
        };
        let updated = habit.clone();

        self.persist(&habits)?;
        self.bus.emit(ChangeEvent::HabitToggled {
            id,
            is_completed: updated.is_completed,
        });
        Ok(updated)
    }

    /// Removes the habit. A no-op for an unknown id.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        let mut habits = self.list();
        let before = habits.len();
        habits.retain(|h| h.id != id);
        if habits.len() == before {
            return Ok(());
        }
        self.persist(&habits)?;
        self.bus.emit(ChangeEvent::HabitDeleted { id });
        Ok(())
    }

    /// Entry point for external progress sources (step counter, health
    /// API, wearable sync): sets the count and marks the habit complete
    /// once the count reaches the target. Never auto-uncompletes.
    ///
    /// Returns the updated habit, or `None` when nothing changed —
    /// including an unknown id, since the signal is best-effort.
    pub fn apply_external_progress(&self, id: Uuid, new_count: u32) -> Result<Option<Habit>> {
        let mut habits = self.list();
        let Some(habit) = habits.iter_mut().find(|h| h.id == id) else {
            return Ok(None);
        };

        let mut changed = false;
        if habit.current_count != new_count {
            habit.current_count = new_count;
            changed = true;
        }
        if new_count >= habit.target_count && !habit.is_completed {
            habit.is_completed = true;
            changed = true;
        }
        if !changed {
            return Ok(None);
        }
        let updated = habit.clone();

        self.persist(&habits)?;
        self.bus.emit(ChangeEvent::HabitProgress {
            id,
            current_count: new_count,
        });
        Ok(Some(updated))
    }

    /// Completion ratio with the canonical percentage formula
    /// `floor(completed * 100 / total)`.
    pub fn completion_ratio(&self) -> CompletionRatio {
        let habits = self.list();
        let total = habits.len() as u32;
        let completed = habits.iter().filter(|h| h.is_completed).count() as u32;
        let percentage = if total > 0 { completed * 100 / total } else { 0 };
        CompletionRatio {
            completed,
            total,
            percentage,
        }
    }

    /// Progress text shown on the widget and in the share sheet.
    pub fn progress_line(&self) -> String {
        let ratio = self.completion_ratio();
        format!("{}/{} habits completed", ratio.completed, ratio.total)
    }

    fn persist(&self, habits: &[Habit]) -> Result<()> {
        store::save_collection(self.store.as_ref(), keys::HABITS, habits)?;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 {
        return Err(ValidationError::NameRequired);
    }
    if len < HABIT_NAME_MIN {
        return Err(ValidationError::NameTooShort { len });
    }
    if len > HABIT_NAME_MAX {
        return Err(ValidationError::NameTooLong { len });
    }
    Ok(name.to_string())
}

fn validate_target(target_count: u32) -> Result<(), ValidationError> {
    if target_count == 0 {
        return Err(ValidationError::TargetNotPositive);
    }
    Ok(())
}
