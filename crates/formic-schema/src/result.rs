//! Validation outcomes.

use serde::Serialize;

use crate::schema::Record;

/// Classification of a failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// A required rule saw an empty value.
    MissingRequiredValue,
    /// A value failed a pattern rule.
    PatternMismatch,
    /// A value failed a length bound.
    ValueOutOfRange,
    /// A whole-record refinement predicate failed.
    CrossFieldMismatch,
}

/// One failed rule, attributed to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The field the error is attributed to. For refinements this is the
    /// designated attribution field, not necessarily a field the predicate
    /// read.
    pub field: String,
    /// What class of rule failed.
    pub kind: ErrorKind,
    /// Human-readable failure message.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of a validation pass.
///
/// At most one error is reported per field: the first failing rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationResult {
    /// Every rule passed; carries the input record unchanged.
    Valid(Record),
    /// At least one rule failed. Errors appear in field definition order.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    /// Returns whether the pass succeeded.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns the recorded errors, empty when valid.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Returns the validated record, if the pass succeeded.
    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Valid(record) => Some(record),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_accessors() {
        let record: Record = [("name".to_string(), "ann".to_string())].into_iter().collect();
        let result = ValidationResult::Valid(record.clone());
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert_eq!(result.record(), Some(&record));
    }

    #[test]
    fn test_invalid_accessors() {
        let result = ValidationResult::Invalid(vec![FieldError {
            field: "name".to_string(),
            kind: ErrorKind::MissingRequiredValue,
            message: "Name is required".to_string(),
        }]);
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.record().is_none());
    }

    #[test]
    fn test_field_error_display() {
        let error = FieldError {
            field: "email".to_string(),
            kind: ErrorKind::PatternMismatch,
            message: "Enter a valid email address.".to_string(),
        };
        assert_eq!(error.to_string(), "email: Enter a valid email address.");
    }

    #[test]
    fn test_field_error_serializes() {
        let error = FieldError {
            field: "email".to_string(),
            kind: ErrorKind::PatternMismatch,
            message: "Enter a valid email address.".to_string(),
        };
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["field"], "email");
        assert_eq!(json["kind"], "PatternMismatch");
    }
}
