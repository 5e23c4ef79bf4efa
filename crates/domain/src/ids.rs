use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Maximum length of an event identifier.
const MAX_EVENT_ID_LENGTH: usize = 128;

/// Identifier of an event owned by the remote API.
///
/// The backend hands these out either as JSON integers or as strings, so
/// the canonical form is the decimal/string rendering: `7` and `"7"` are the
/// same id. Ids are used as URL path segments and therefore cannot be empty,
/// contain `/`, or be the dot segments `.` and `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct EventId(String);

impl EventId {
    /// Create a validated event id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidId` if the id is empty after trimming,
    /// exceeds 128 characters, contains a path separator, or is a dot
    /// segment.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("event id cannot be empty"));
        }
        if trimmed.len() > MAX_EVENT_ID_LENGTH {
            return Err(DomainError::invalid_id(format!(
                "event id cannot exceed {} characters",
                MAX_EVENT_ID_LENGTH
            )));
        }
        if trimmed.contains('/') {
            return Err(DomainError::invalid_id(format!(
                "event id '{}' cannot contain '/'",
                trimmed
            )));
        }
        if matches!(trimmed, "." | "..") {
            return Err(DomainError::invalid_id(format!(
                "event id '{}' is not a valid path segment",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<u64> for EventId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<EventId> for String {
    fn from(value: EventId) -> Self {
        value.0
    }
}

impl TryFrom<String> for EventId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawEventId {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        let raw = match RawEventId::deserialize(deserializer)? {
            RawEventId::Unsigned(n) => n.to_string(),
            RawEventId::Signed(n) => n.to_string(),
            RawEventId::Text(s) => s,
        };
        EventId::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts_plain_ids() {
        let id = EventId::new("  42 ").expect("valid id");
        assert_eq!(id.as_str(), "42");
        assert_eq!(id, EventId::from(42));
    }

    #[test]
    fn rejects_empty_and_path_like_ids() {
        assert!(EventId::new("   ").is_err());
        assert!(EventId::new("7/../8").is_err());
        assert!(EventId::new(".").is_err());
        assert!(EventId::new(" .. ").is_err());
        assert!(EventId::new("...").is_ok());
        assert!(EventId::new("x".repeat(MAX_EVENT_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn integer_and_string_forms_decode_to_same_id() {
        let from_int: EventId = serde_json::from_str("7").expect("int id");
        let from_str: EventId = serde_json::from_str("\"7\"").expect("string id");
        assert_eq!(from_int, from_str);

        let uuid_like: EventId =
            serde_json::from_str("\"5f0c6a1e-9b7d-4c43-a0f2-1d2f3e4a5b6c\"").expect("uuid id");
        assert_eq!(uuid_like.as_str(), "5f0c6a1e-9b7d-4c43-a0f2-1d2f3e4a5b6c");
    }

    #[test]
    fn invalid_wire_id_fails_to_decode() {
        assert!(serde_json::from_str::<EventId>("\"\"").is_err());
        assert!(serde_json::from_str::<EventId>("null").is_err());
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&EventId::from(12)).expect("serialize");
        assert_eq!(json, "\"12\"");
    }
}
