//! Mood ledger: timestamped emoji journal entries with a derived value.
//!
//! Entries persist in insertion order; the two display orders (descending
//! for the journal list, ascending for the chart) are computed per call.
//! The emoji-to-value table is total: unmapped emoji read as neutral (3),
//! since quick-entry paths can introduce emoji the table never saw.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};
use crate::events::{ChangeBus, ChangeEvent};
use crate::store::{self, keys, RecordStore};

/// Maximum note length in characters.
pub const MOOD_NOTE_MAX: usize = 200;

/// The emoji offered by the standard entry picker.
pub const MOOD_EMOJI_CHOICES: [&str; 9] = ["😊", "😐", "😔", "😠", "😂", "😢", "😴", "🤩", "🤔"];

/// Emoji and note used by the shake quick-entry path.
pub const QUICK_ENTRY_EMOJI: &str = "🤷";
pub const QUICK_ENTRY_NOTE: &str = "Quick entry (shake)";

/// A timestamped emoji-tagged journal record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub id: Uuid,
    pub mood_emoji: String,
    pub note: String,
    /// Creation time, milliseconds since epoch.
    pub timestamp_ms: i64,
    /// Derived from `mood_emoji` via [`mood_value_for`].
    pub mood_value: u8,
}

/// Display order for [`MoodLedger::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first, for charting.
    Ascending,
    /// Newest first, for the journal view.
    Descending,
}

/// Maps a mood emoji to its numeric value in `[0, 5]`.
///
/// Total over all strings: anything outside the table is neutral (3).
pub fn mood_value_for(emoji: &str) -> u8 {
    match emoji {
        "😊" | "😂" => 5,
        "🤩" => 4,
        "😐" | "🤔" | "🤷" => 3,
        "😴" => 2,
        "😔" | "😢" => 1,
        "😠" => 0,
        _ => 3,
    }
}

/// CRUD over mood entries plus daily summaries.
pub struct MoodLedger {
    store: Arc<dyn RecordStore>,
    bus: ChangeBus,
}

impl MoodLedger {
    pub fn new(store: Arc<dyn RecordStore>, bus: ChangeBus) -> Self {
        Self { store, bus }
    }

    /// Returns all entries sorted by timestamp in the requested order.
    pub fn list(&self, order: SortOrder) -> Vec<MoodEntry> {
        let mut entries: Vec<MoodEntry> =
            store::load_collection(self.store.as_ref(), keys::MOOD_ENTRIES);
        match order {
            SortOrder::Ascending => entries.sort_by_key(|e| e.timestamp_ms),
            SortOrder::Descending => entries.sort_by_key(|e| std::cmp::Reverse(e.timestamp_ms)),
        }
        entries
    }

    /// Adds an entry stamped with the current time.
    ///
    /// # Errors
    /// Returns a validation error when the note exceeds [`MOOD_NOTE_MAX`]
    /// characters; nothing is persisted in that case.
    pub fn add(&self, emoji: &str, note: &str) -> Result<MoodEntry> {
        self.add_at(emoji, note, Utc::now().timestamp_millis())
    }

    /// The shake-to-log path: a neutral 🤷 entry with a fixed note.
    pub fn quick_add(&self) -> Result<MoodEntry> {
        self.add(QUICK_ENTRY_EMOJI, QUICK_ENTRY_NOTE)
    }

    fn add_at(&self, emoji: &str, note: &str, timestamp_ms: i64) -> Result<MoodEntry> {
        validate_note(note)?;
        let entry = MoodEntry {
            id: Uuid::new_v4(),
            mood_emoji: emoji.to_string(),
            note: note.to_string(),
            timestamp_ms,
            mood_value: mood_value_for(emoji),
        };

        let mut entries = self.stored();
        entries.push(entry.clone());
        self.persist(&entries)?;
        self.bus.emit(ChangeEvent::MoodAdded { id: entry.id });
        Ok(entry)
    }

    /// Replaces the emoji and note of an entry, re-deriving the value.
    /// The original timestamp is kept.
    ///
    /// # Errors
    /// `NotFound` if the id is absent; validation error for an overlong note.
    pub fn edit(&self, id: Uuid, emoji: &str, note: &str) -> Result<MoodEntry> {
        validate_note(note)?;
        let mut entries = self.stored();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(CoreError::NotFound {
                what: "mood entry",
                id,
            })?;

        entry.mood_emoji = emoji.to_string();
        entry.note = note.to_string();
        entry.mood_value = mood_value_for(emoji);
        let updated = entry.clone();

        self.persist(&entries)?;
        self.bus.emit(ChangeEvent::MoodEdited { id });
        Ok(updated)
    }

    /// Removes the entry. A no-op for an unknown id.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        let mut entries = self.stored();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(());
        }
        self.persist(&entries)?;
        self.bus.emit(ChangeEvent::MoodDeleted { id });
        Ok(())
    }

    /// Number of entries whose timestamp falls on the given calendar day,
    /// in the local time zone.
    pub fn count_on_date(&self, date: NaiveDate) -> usize {
        self.stored()
            .iter()
            .filter(|e| local_date_of(e.timestamp_ms) == Some(date))
            .count()
    }

    /// Today's entry count, for the dashboard summary.
    pub fn count_today(&self) -> usize {
        self.count_on_date(Local::now().date_naive())
    }

    /// Share text: one line per entry, newest first.
    pub fn summary(&self) -> String {
        self.list(SortOrder::Descending)
            .iter()
            .map(|e| {
                let date = local_date_line(e.timestamp_ms);
                let note = if e.note.is_empty() { "No note" } else { &e.note };
                format!("{} - {}: {}", date, e.mood_emoji, note)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn stored(&self) -> Vec<MoodEntry> {
        store::load_collection(self.store.as_ref(), keys::MOOD_ENTRIES)
    }

    fn persist(&self, entries: &[MoodEntry]) -> Result<()> {
        store::save_collection(self.store.as_ref(), keys::MOOD_ENTRIES, entries)?;
        Ok(())
    }
}

fn validate_note(note: &str) -> Result<(), ValidationError> {
    let len = note.chars().count();
    if len > MOOD_NOTE_MAX {
        return Err(ValidationError::NoteTooLong { len });
    }
    Ok(())
}

fn local_datetime_of(timestamp_ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(timestamp_ms).earliest()
}

fn local_date_of(timestamp_ms: i64) -> Option<NaiveDate> {
    local_datetime_of(timestamp_ms).map(|dt| dt.date_naive())
}

fn local_date_line(timestamp_ms: i64) -> String {
    match local_datetime_of(timestamp_ms) {
        Some(dt) => dt.format("%b %d, %Y").to_string(),
        None => "Unknown date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use proptest::prelude::*;

    fn ledger() -> MoodLedger {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        MoodLedger::new(store, ChangeBus::new())
    }

    fn local_millis(year: i32, month: u32, day: u32, hour: u32) -> i64 {
        Local
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .earliest()
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn test_add_derives_value_from_emoji() {
        let ledger = ledger();
        let entry = ledger.add("😊", "good day").unwrap();
        assert_eq!(entry.mood_value, 5);
        assert_eq!(ledger.list(SortOrder::Ascending), vec![entry]);
    }

    #[test]
    fn test_add_rejects_overlong_note() {
        let ledger = ledger();
        let err = ledger.add("😊", &"x".repeat(201)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NoteTooLong { len: 201 })
        ));
        assert!(ledger.list(SortOrder::Ascending).is_empty());
    }

    #[test]
    fn test_note_at_limit_is_accepted() {
        let ledger = ledger();
        assert!(ledger.add("😊", &"x".repeat(200)).is_ok());
    }

    #[test]
    fn test_list_orders_by_timestamp() {
        let ledger = ledger();
        let older = ledger.add_at("😔", "", local_millis(2024, 3, 4, 9)).unwrap();
        let newer = ledger.add_at("😊", "", local_millis(2024, 3, 5, 9)).unwrap();

        let ascending = ledger.list(SortOrder::Ascending);
        assert_eq!(ascending, vec![older.clone(), newer.clone()]);

        let descending = ledger.list(SortOrder::Descending);
        assert_eq!(descending, vec![newer, older]);
    }

    #[test]
    fn test_edit_rederives_value_and_keeps_timestamp() {
        let ledger = ledger();
        let entry = ledger.add("😔", "rough morning").unwrap();

        let updated = ledger.edit(entry.id, "😊", "better now").unwrap();
        assert_eq!(updated.mood_value, 5);
        assert_eq!(updated.timestamp_ms, entry.timestamp_ms);
    }

    #[test]
    fn test_edit_unknown_id_is_not_found() {
        let ledger = ledger();
        let err = ledger.edit(Uuid::new_v4(), "😊", "").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { what: "mood entry", .. }));
    }

    #[test]
    fn test_delete_removes_by_identity() {
        let ledger = ledger();
        let keep = ledger.add("😊", "").unwrap();
        let gone = ledger.add("😢", "").unwrap();

        ledger.delete(gone.id).unwrap();
        assert_eq!(ledger.list(SortOrder::Ascending), vec![keep]);

        // Unknown id is a no-op.
        ledger.delete(gone.id).unwrap();
    }

    #[test]
    fn test_count_on_date_buckets_by_local_day() {
        let ledger = ledger();
        ledger.add_at("😊", "", local_millis(2024, 3, 5, 1)).unwrap();
        ledger.add_at("😐", "", local_millis(2024, 3, 5, 23)).unwrap();
        ledger.add_at("😢", "", local_millis(2024, 3, 6, 0)).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(ledger.count_on_date(day), 2);
        let next = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(ledger.count_on_date(next), 1);
    }

    #[test]
    fn test_count_today_sees_fresh_entries() {
        let ledger = ledger();
        assert_eq!(ledger.count_today(), 0);
        ledger.add("😊", "").unwrap();
        assert_eq!(ledger.count_today(), 1);
    }

    #[test]
    fn test_quick_add_is_neutral() {
        let ledger = ledger();
        let entry = ledger.quick_add().unwrap();
        assert_eq!(entry.mood_emoji, QUICK_ENTRY_EMOJI);
        assert_eq!(entry.note, QUICK_ENTRY_NOTE);
        assert_eq!(entry.mood_value, 3);
    }

    #[test]
    fn test_summary_lines_newest_first() {
        let ledger = ledger();
        ledger.add_at("😔", "", local_millis(2024, 3, 4, 9)).unwrap();
        ledger
            .add_at("😊", "sunny walk", local_millis(2024, 3, 5, 9))
            .unwrap();

        let summary = ledger.summary();
        assert_eq!(
            summary,
            "Mar 05, 2024 - 😊: sunny walk\nMar 04, 2024 - 😔: No note"
        );
    }

    #[test]
    fn test_value_table_fixed_points() {
        for (emoji, value) in [
            ("😊", 5),
            ("😂", 5),
            ("🤩", 4),
            ("😐", 3),
            ("🤔", 3),
            ("🤷", 3),
            ("😴", 2),
            ("😔", 1),
            ("😢", 1),
            ("😠", 0),
        ] {
            assert_eq!(mood_value_for(emoji), value, "emoji {emoji}");
        }
    }

    proptest! {
        // The table is total: any string maps into [0, 5].
        #[test]
        fn prop_value_table_is_total(emoji in ".*") {
            let value = mood_value_for(&emoji);
            prop_assert!(value <= 5);
        }

        // Strings outside the picker set read as neutral.
        #[test]
        fn prop_unmapped_emoji_is_neutral(emoji in "[a-z]{1,8}") {
            prop_assert_eq!(mood_value_for(&emoji), 3);
        }
    }
}
