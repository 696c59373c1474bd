//! Common validation utilities.

use validator::ValidationError;

/// Bookable time-slot labels, in the order the booking form offers them.
///
/// Slots are opaque keys: two bookings share a slot only when their labels
/// are identical.
pub const TIME_SLOTS: [&str; 16] = [
    "5-6 AM", "6-7 AM", "7-8 AM", "8-9 AM", "9-10 AM", "10-11 AM", "11-12 PM", "1-2 PM", "2-3 PM",
    "3-4 PM", "4-5 PM", "5-6 PM", "6-7 PM", "7-8 PM", "8-9 PM", "9-10 PM",
];

/// Returns the canonical slot label for `label`, ignoring surrounding whitespace.
pub fn canonical_time_slot(label: &str) -> Option<&'static str> {
    let trimmed = label.trim();
    TIME_SLOTS.iter().copied().find(|slot| *slot == trimmed)
}

/// Validates that a time-slot label is one of [`TIME_SLOTS`].
pub fn validate_time_slot(label: &str) -> Result<(), ValidationError> {
    if canonical_time_slot(label).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("time_slot");
        err.message = Some("Unknown time slot".into());
        Err(err)
    }
}

/// Validates that a string has at least one non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Normalizes an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_time_slot_exact() {
        assert_eq!(canonical_time_slot("7-8 PM"), Some("7-8 PM"));
        assert_eq!(canonical_time_slot("5-6 AM"), Some("5-6 AM"));
    }

    #[test]
    fn test_canonical_time_slot_trims() {
        assert_eq!(canonical_time_slot("  7-8 PM "), Some("7-8 PM"));
    }

    #[test]
    fn test_canonical_time_slot_is_case_sensitive() {
        assert_eq!(canonical_time_slot("7-8 pm"), None);
    }

    #[test]
    fn test_canonical_time_slot_unknown() {
        assert_eq!(canonical_time_slot("12-1 PM"), None);
        assert_eq!(canonical_time_slot(""), None);
    }

    #[test]
    fn test_validate_time_slot() {
        assert!(validate_time_slot("9-10 PM").is_ok());
        let err = validate_time_slot("midnight").unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Unknown time slot");
    }

    #[test]
    fn test_time_slots_are_unique() {
        let mut slots = TIME_SLOTS.to_vec();
        slots.sort_unstable();
        slots.dedup();
        assert_eq!(slots.len(), TIME_SLOTS.len());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Circle K Court").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   \t").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("bob@example.com"), "bob@example.com");
    }
}
