//! Display mapping for raw sensor values.
//!
//! # Responsibilities
//! - Map raw bay identifiers to human-readable names
//! - Map raw status codes to display labels
//! - Reject any value outside the enumerated domains
//!
//! # Design Decisions
//! - Lookup tables are immutable and baked into the binary
//! - Accessors are pure functions, safe for concurrent use
//! - Unknown values are errors, never passed through verbatim

use thiserror::Error;

/// Known bay identifiers and their display names.
const BAY_NAMES: [(&str, &str); 6] = [
    ("washbay1", "Washbay 1"),
    ("washbay2", "Washbay 2"),
    ("washbay3", "Washbay 3"),
    ("washbay4", "Washbay 4"),
    ("washbay5", "Washbay 5"),
    ("washbay6", "Washbay 6"),
];

/// Known status codes and their display labels.
const STATUS_LABELS: [(i32, &str); 3] = [(0, "Empty"), (1, "Occupied"), (2, "Down")];

/// Errors for values outside the enumerated domains.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid bay_id: {0}")]
    UnknownBay(String),

    #[error("invalid status_code: {0}")]
    UnknownStatusCode(i32),
}

/// Display name for a raw bay identifier.
pub fn display_bay(raw: &str) -> Result<&'static str, CodecError> {
    BAY_NAMES
        .iter()
        .find(|(id, _)| *id == raw)
        .map(|(_, name)| *name)
        .ok_or_else(|| CodecError::UnknownBay(raw.to_string()))
}

/// Display label for a raw status code.
pub fn display_status(code: i32) -> Result<&'static str, CodecError> {
    STATUS_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .ok_or(CodecError::UnknownStatusCode(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_bay_maps() {
        for i in 1..=6 {
            let raw = format!("washbay{}", i);
            let name = display_bay(&raw).unwrap();
            assert_eq!(name, format!("Washbay {}", i));
        }
    }

    #[test]
    fn test_unknown_bay_is_rejected() {
        let err = display_bay("washbay7").unwrap_err();
        assert_eq!(err, CodecError::UnknownBay("washbay7".to_string()));

        assert!(display_bay("").is_err());
        assert!(display_bay("Washbay 1").is_err()); // display names are not raw ids
    }

    #[test]
    fn test_every_known_status_maps() {
        assert_eq!(display_status(0).unwrap(), "Empty");
        assert_eq!(display_status(1).unwrap(), "Occupied");
        assert_eq!(display_status(2).unwrap(), "Down");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = display_status(99).unwrap_err();
        assert_eq!(err, CodecError::UnknownStatusCode(99));
        assert!(display_status(-1).is_err());
        assert!(display_status(3).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = display_bay("garage").unwrap_err();
        assert_eq!(err.to_string(), "invalid bay_id: garage");

        let err = display_status(7).unwrap_err();
        assert_eq!(err.to_string(), "invalid status_code: 7");
    }
}
