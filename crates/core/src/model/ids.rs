use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Login name identifying an account on the platform.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Creates a new `Username`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseIdError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError::new("Username"));
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Course key in the `course-v1:Org+Number+Run` form.
///
/// Only the shape `<prefix>:<rest>` is checked; the platform owns the full grammar.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Creates a new `CourseId`.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the value is blank or has no `:` separator.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseIdError> {
        let value = value.into();
        let trimmed = value.trim();
        match trimmed.split_once(':') {
            Some((prefix, rest)) if !prefix.is_empty() && !rest.is_empty() => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(ParseIdError::new("CourseId")),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username({})", self.0)
    }
}

impl fmt::Debug for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CourseId({})", self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl From<CourseId> for String {
    fn from(value: CourseId) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for CourseId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an identifier from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl ParseIdError {
    fn new(kind: &'static str) -> Self {
        Self { kind }
    }
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for Username {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for CourseId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed() {
        let name: Username = "  edx_learner ".parse().unwrap();
        assert_eq!(name.as_str(), "edx_learner");
        assert_eq!(name.to_string(), "edx_learner");
    }

    #[test]
    fn blank_username_is_rejected() {
        assert!("   ".parse::<Username>().is_err());
    }

    #[test]
    fn course_id_requires_prefix_separator() {
        assert!("course-v1:edX+DemoX+Demo_Course".parse::<CourseId>().is_ok());
        assert!("DemoX".parse::<CourseId>().is_err());
        assert!(":DemoX".parse::<CourseId>().is_err());
    }

    #[test]
    fn username_deserializes_through_validation() {
        let err = serde_json::from_str::<Username>("\"\"");
        assert!(err.is_err());
        let ok: Username = serde_json::from_str("\"staff\"").unwrap();
        assert_eq!(ok.as_str(), "staff");
    }
}
