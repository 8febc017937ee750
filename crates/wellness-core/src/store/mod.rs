//! Key-value record persistence.
//!
//! Every collection and scalar setting in the app lives under a fixed key
//! in a durable key-value store. Collections are stored as JSON lists;
//! scalars as plain text. Reads fail open: a missing or corrupt value
//! yields the documented default, never an error to the caller.
//!
//! The store is an injected capability (`Arc<dyn RecordStore>`), not an
//! ambient singleton; each ledger component receives it at construction.

pub mod sqlite;

pub use sqlite::SqliteStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::StoreError;

/// Fixed storage keys shared by all components.
pub mod keys {
    pub const HABITS: &str = "habits";
    pub const MOOD_ENTRIES: &str = "mood_entries";
    pub const HYDRATION_INTERVAL: &str = "hydration_interval";
    pub const HYDRATION_ENABLED: &str = "hydration_enabled";
    pub const DAILY_WATER_COUNT: &str = "daily_water_count";
    pub const ONBOARDING_COMPLETED: &str = "onboarding_completed";
    pub const SECURITY_PIN: &str = "security_pin";

    /// Every key the store may hold, in wipe order.
    pub const ALL: [&str; 7] = [
        HABITS,
        MOOD_ENTRIES,
        HYDRATION_INTERVAL,
        HYDRATION_ENABLED,
        DAILY_WATER_COUNT,
        ONBOARDING_COMPLETED,
        SECURITY_PIN,
    ];
}

/// Durable key-value storage of string values under fixed keys.
///
/// A `put` for a key must be atomic with respect to concurrent `get`s of
/// the same key: a reader sees either the old value or the new one, never
/// a partial write.
pub trait RecordStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrites the value under `key`.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the key if present.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Returns the data directory, `~/.config/wellness-tracker[-dev]/`.
///
/// Set WELLNESS_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WELLNESS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("wellness-tracker-dev")
    } else {
        base_dir.join("wellness-tracker")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Loads a collection, substituting an empty list when the key is absent
/// or the payload does not parse.
pub(crate) fn load_collection<T: DeserializeOwned>(store: &dyn RecordStore, key: &str) -> Vec<T> {
    match store.get(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Serializes and overwrites a whole collection under `key`.
pub(crate) fn save_collection<T: Serialize>(
    store: &dyn RecordStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let json = serde_json::to_string(items).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.put(key, &json)
}

pub(crate) fn load_bool(store: &dyn RecordStore, key: &str, default: bool) -> bool {
    match store.get(key) {
        Ok(Some(value)) => value.parse().unwrap_or(default),
        _ => default,
    }
}

pub(crate) fn put_bool(store: &dyn RecordStore, key: &str, value: bool) -> Result<(), StoreError> {
    store.put(key, if value { "true" } else { "false" })
}

pub(crate) fn load_u32(store: &dyn RecordStore, key: &str, default: u32) -> u32 {
    match store.get(key) {
        Ok(Some(value)) => value.parse().unwrap_or(default),
        _ => default,
    }
}

pub(crate) fn put_u32(store: &dyn RecordStore, key: &str, value: u32) -> Result<(), StoreError> {
    store.put(key, &value.to_string())
}

pub(crate) fn load_string(store: &dyn RecordStore, key: &str, default: &str) -> String {
    match store.get(key) {
        Ok(Some(value)) => value,
        _ => default.to_string(),
    }
}

/// Summary of a [`wipe`] run: which keys actually held data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WipeSummary {
    pub cleared: Vec<&'static str>,
}

/// Removes every known key from the store (the "Clear data" action).
///
/// # Errors
/// Returns an error if a read or delete fails; keys cleared before the
/// failure stay cleared.
pub fn wipe(store: &dyn RecordStore) -> Result<WipeSummary, StoreError> {
    let mut summary = WipeSummary::default();
    for key in keys::ALL {
        if store.get(key)?.is_some() {
            store.remove(key)?;
            summary.cleared.push(key);
        }
    }
    Ok(summary)
}
