//! Per-field validation rules.

use regex::Regex;

use crate::error::SchemaError;
use crate::result::ErrorKind;

/// A validation rule over a single field's raw value.
///
/// Rules are a closed set of variants, each pairing a pure check with a
/// failure message. Checks are total: they never panic and never abort the
/// validation of other fields.
#[derive(Debug, Clone)]
pub enum Rule {
    /// The value must be non-empty (ignoring surrounding whitespace).
    Required { message: String },
    /// The value must match a regular expression.
    Pattern { pattern: Regex, message: String },
    /// The value must be at least `min` bytes long.
    MinLength { min: usize, message: String },
    /// The value must be at most `max` bytes long.
    MaxLength { max: usize, message: String },
}

impl Rule {
    /// Creates a required rule with the default message.
    pub fn required() -> Self {
        Self::required_with("This field is required.")
    }

    /// Creates a required rule with a custom message.
    pub fn required_with(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    /// Creates a pattern rule with the default message.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if the pattern fails to
    /// compile.
    pub fn pattern(pattern: &str) -> Result<Self, SchemaError> {
        Self::pattern_with(pattern, "Enter a valid value.")
    }

    /// Creates a pattern rule with a custom message.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if the pattern fails to
    /// compile.
    pub fn pattern_with(pattern: &str, message: impl Into<String>) -> Result<Self, SchemaError> {
        Ok(Self::Pattern {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    /// Creates a minimum-length rule with the default message.
    pub fn min_length(min: usize) -> Self {
        Self::MinLength {
            min,
            message: format!("Ensure this value has at least {min} characters."),
        }
    }

    /// Creates a minimum-length rule with a custom message.
    pub fn min_length_with(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    /// Creates a maximum-length rule with the default message.
    pub fn max_length(max: usize) -> Self {
        Self::MaxLength {
            max,
            message: format!("Ensure this value has at most {max} characters."),
        }
    }

    /// Creates a maximum-length rule with a custom message.
    pub fn max_length_with(max: usize, message: impl Into<String>) -> Self {
        Self::MaxLength {
            max,
            message: message.into(),
        }
    }

    /// Checks a raw value, returning the failure message if it does not pass.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            Self::Required { message } => {
                if value.trim().is_empty() {
                    Err(message.clone())
                } else {
                    Ok(())
                }
            }
            Self::Pattern { pattern, message } => {
                if pattern.is_match(value) {
                    Ok(())
                } else {
                    Err(message.clone())
                }
            }
            Self::MinLength { min, message } => {
                if value.len() < *min {
                    Err(message.clone())
                } else {
                    Ok(())
                }
            }
            Self::MaxLength { max, message } => {
                if value.len() > *max {
                    Err(message.clone())
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Returns the error classification a failing check reports.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Required { .. } => ErrorKind::MissingRequiredValue,
            Self::Pattern { .. } => ErrorKind::PatternMismatch,
            Self::MinLength { .. } | Self::MaxLength { .. } => ErrorKind::ValueOutOfRange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rule() {
        let rule = Rule::required();
        assert!(rule.check("hello").is_ok());
        assert!(rule.check("").is_err());
        assert!(rule.check("   ").is_err());
        assert_eq!(rule.kind(), ErrorKind::MissingRequiredValue);
    }

    #[test]
    fn test_required_custom_message() {
        let rule = Rule::required_with("Username is required");
        assert_eq!(rule.check(""), Err("Username is required".to_string()));
    }

    #[test]
    fn test_pattern_rule() {
        let rule = Rule::pattern_with("^[A-Za-z]+$", "Only letters are allowed").unwrap();
        assert!(rule.check("ann").is_ok());
        assert_eq!(rule.check("an1"), Err("Only letters are allowed".to_string()));
        assert_eq!(rule.kind(), ErrorKind::PatternMismatch);
    }

    #[test]
    fn test_invalid_pattern_is_construction_error() {
        assert!(matches!(
            Rule::pattern("["),
            Err(SchemaError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_min_length_rule() {
        let rule = Rule::min_length(5);
        assert!(rule.check("hello").is_ok());
        assert!(rule.check("hi").is_err());
        assert_eq!(rule.kind(), ErrorKind::ValueOutOfRange);
    }

    #[test]
    fn test_max_length_rule() {
        let rule = Rule::max_length(5);
        assert!(rule.check("hello").is_ok());
        assert!(rule.check("hello world").is_err());
    }
}
