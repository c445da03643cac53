//! Core type definitions with validation.

use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Invalid work mode value.
    #[error("invalid work mode: {value}")]
    InvalidWorkMode { value: String },

    /// Invalid override status value.
    #[error("invalid attendance status: {value}")]
    InvalidStatus { value: String },

    /// A time-of-day value could not be parsed.
    #[error("invalid time of day: {value} (expected HH:MM or HH:MM:SS)")]
    InvalidTime { value: String },

    /// A weekday name could not be parsed.
    #[error("invalid weekday: {value}")]
    InvalidWeekday { value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated employee identifier.
    ///
    /// Employee IDs are opaque, non-empty strings (e.g. "EMP-0042").
    EmployeeId, "employee ID"
);

define_string_id!(
    /// A validated attendance record identifier.
    ///
    /// Generated by the store when a record is first created.
    RecordId, "record ID"
);

/// Where an employee works, which decides whether the web clock is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    /// Tracked by biometric devices or imports, not by self-service.
    #[default]
    Office,
    Remote,
    Hybrid,
}

impl WorkMode {
    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Office => "office",
            Self::Remote => "remote",
            Self::Hybrid => "hybrid",
        }
    }

    /// Whether self-service clock-in/clock-out is offered for this mode.
    #[must_use]
    pub const fn allows_self_service(self) -> bool {
        matches!(self, Self::Remote | Self::Hybrid)
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WorkMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "office" => Ok(Self::Office),
            "remote" => Ok(Self::Remote),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(ValidationError::InvalidWorkMode {
                value: s.to_string(),
            }),
        }
    }
}

/// An employee as known to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub work_mode: WorkMode,
}

/// Parses a time of day written as `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ValidationError::InvalidTime {
            value: value.to_string(),
        })
}

/// Parses a weekday name such as "Sat", "saturday" or "SUN".
pub fn parse_weekday(value: &str) -> Result<Weekday, ValidationError> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| ValidationError::InvalidWeekday {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_id_rejects_empty() {
        assert!(EmployeeId::new("").is_err());
        assert!(EmployeeId::new("   ").is_err());
        assert!(EmployeeId::new("EMP-1").is_ok());
    }

    #[test]
    fn employee_id_serde_rejects_empty() {
        let result: Result<EmployeeId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());

        let parsed: EmployeeId = serde_json::from_str("\"EMP-7\"").unwrap();
        assert_eq!(parsed.as_str(), "EMP-7");
    }

    #[test]
    fn work_mode_from_str_is_case_insensitive() {
        assert_eq!("Remote".parse::<WorkMode>().unwrap(), WorkMode::Remote);
        assert_eq!("HYBRID".parse::<WorkMode>().unwrap(), WorkMode::Hybrid);
        assert_eq!("office".parse::<WorkMode>().unwrap(), WorkMode::Office);
        assert!("field".parse::<WorkMode>().is_err());
    }

    #[test]
    fn only_remote_and_hybrid_allow_self_service() {
        assert!(!WorkMode::Office.allows_self_service());
        assert!(WorkMode::Remote.allows_self_service());
        assert!(WorkMode::Hybrid.allows_self_service());
    }

    #[test]
    fn parse_time_of_day_accepts_both_forms() {
        assert_eq!(
            parse_time_of_day("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day("08:59:30").unwrap(),
            NaiveTime::from_hms_opt(8, 59, 30).unwrap()
        );
        assert!(parse_time_of_day("9am").is_err());
        assert!(parse_time_of_day("25:00").is_err());
    }

    #[test]
    fn parse_weekday_accepts_short_and_long_names() {
        assert_eq!(parse_weekday("Sat").unwrap(), Weekday::Sat);
        assert_eq!(parse_weekday("sunday").unwrap(), Weekday::Sun);
        assert!(parse_weekday("caturday").is_err());
    }
}
