//! Symbolic validation error codes
//!
//! Validators never produce human-readable messages. They return tags that
//! the caller maps to whatever wording (and language) it wants.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered error codes for one field. Empty means the field is valid.
pub type FieldErrorList = Vec<ErrorCode>;

/// Validation failure tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Mandatory,
    LengthMin,
    LengthMax,
    ExprMatch,
    AlphabeticMatch,
    EmailMatch,
    NumberMatch,
    IntegerMatch,
    PhoneMatch,
    ChecklistMatch,
    ConsistencyFailed,
    UnknownFormat,
    /// Tag produced by a consumer-registered validator.
    Custom(String),
}

impl ErrorCode {
    const BUILT_IN: [ErrorCode; 12] = [
        ErrorCode::Mandatory,
        ErrorCode::LengthMin,
        ErrorCode::LengthMax,
        ErrorCode::ExprMatch,
        ErrorCode::AlphabeticMatch,
        ErrorCode::EmailMatch,
        ErrorCode::NumberMatch,
        ErrorCode::IntegerMatch,
        ErrorCode::PhoneMatch,
        ErrorCode::ChecklistMatch,
        ErrorCode::ConsistencyFailed,
        ErrorCode::UnknownFormat,
    ];

    /// Creates a consumer-defined tag. A built-in tag maps to its variant.
    pub fn custom(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        match Self::BUILT_IN.iter().find(|code| code.as_str() == tag) {
            Some(code) => code.clone(),
            None => ErrorCode::Custom(tag),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::Mandatory => "MANDATORY_ERROR",
            ErrorCode::LengthMin => "LENGTH_MIN_ERROR",
            ErrorCode::LengthMax => "LENGTH_MAX_ERROR",
            ErrorCode::ExprMatch => "EXPR_MATCH_ERROR",
            ErrorCode::AlphabeticMatch => "ALPHABETIC_MATCH_ERROR",
            ErrorCode::EmailMatch => "EMAIL_MATCH_ERROR",
            ErrorCode::NumberMatch => "NUMBER_MATCH_ERROR",
            ErrorCode::IntegerMatch => "INTEGER_MATCH_ERROR",
            ErrorCode::PhoneMatch => "PHONE_MATCH_ERROR",
            ErrorCode::ChecklistMatch => "CHECKLIST_MATCH_ERROR",
            ErrorCode::ConsistencyFailed => "CONSISTENCY_FAILED_ERROR",
            ErrorCode::UnknownFormat => "UNKNOWN_FORMAT_ERROR",
            ErrorCode::Custom(tag) => tag,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ErrorCode::Custom(_))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = Infallible;

    /// Built-in tags map back to their variant, anything else is `Custom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::custom(s))
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        let Ok(code) = tag.parse::<ErrorCode>();
        Ok(code)
    }
}

/// Joins a list of codes with `,` for log output.
pub fn describe_errors(errors: &[ErrorCode]) -> String {
    errors.iter().map(ErrorCode::as_str).join(",")
}
