//! PIN access gate.
//!
//! A single shared secret gating entry into the main application. Two
//! states derived from the store: no PIN yet (only `set_pin` is valid)
//! and PIN set (only `verify` is valid). No lockout or attempt counting.

use std::sync::Arc;

use crate::error::{Result, ValidationError};
use crate::store::{self, keys, RecordStore};

/// Required PIN length.
pub const PIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No PIN stored; the empty string at rest means "not set".
    Unset,
    Set,
}

/// PIN-based entry gate over the record store.
pub struct AccessGate {
    store: Arc<dyn RecordStore>,
}

impl AccessGate {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn state(&self) -> GateState {
        if self.stored_pin().is_empty() {
            GateState::Unset
        } else {
            GateState::Set
        }
    }

    /// Stores the PIN and transitions to [`GateState::Set`].
    ///
    /// # Errors
    /// Rejects anything but exactly 4 ASCII digits, and rejects the call
    /// outright once a PIN exists.
    pub fn set_pin(&self, candidate: &str) -> Result<()> {
        if self.state() == GateState::Set {
            return Err(ValidationError::PinAlreadySet.into());
        }
        validate_pin(candidate)?;
        self.store.put(keys::SECURITY_PIN, candidate)?;
        Ok(())
    }

    /// Compares the candidate against the stored PIN. Always false while
    /// no PIN is set.
    pub fn verify(&self, candidate: &str) -> bool {
        let pin = self.stored_pin();
        !pin.is_empty() && pin == candidate
    }

    fn stored_pin(&self) -> String {
        store::load_string(self.store.as_ref(), keys::SECURITY_PIN, "")
    }
}

fn validate_pin(pin: &str) -> Result<(), ValidationError> {
    if pin.len() != PIN_LENGTH || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PinFormat);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::store::SqliteStore;

    fn gate() -> AccessGate {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        AccessGate::new(store)
    }

    #[test]
    fn test_starts_unset_and_verifies_nothing() {
        let gate = gate();
        assert_eq!(gate.state(), GateState::Unset);
        assert!(!gate.verify("1234"));
        assert!(!gate.verify(""));
    }

    #[test]
    fn test_non_numeric_pin_is_rejected() {
        let gate = gate();
        let err = gate.set_pin("12ab").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::PinFormat)
        ));
        assert_eq!(gate.state(), GateState::Unset);
    }

    #[test]
    fn test_wrong_length_pin_is_rejected() {
        let gate = gate();
        assert!(gate.set_pin("123").is_err());
        assert!(gate.set_pin("12345").is_err());
        assert!(gate.set_pin("").is_err());
    }

    #[test]
    fn test_set_then_verify() {
        let gate = gate();
        gate.set_pin("1234").unwrap();
        assert_eq!(gate.state(), GateState::Set);
        assert!(gate.verify("1234"));
        assert!(!gate.verify("0000"));
    }

    #[test]
    fn test_set_pin_rejected_once_set() {
        let gate = gate();
        gate.set_pin("1234").unwrap();
        let err = gate.set_pin("5678").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::PinAlreadySet)
        ));
        assert!(gate.verify("1234"));
    }
}
