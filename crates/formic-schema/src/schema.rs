//! Schema construction and the validation pass.

use std::collections::HashMap;

use crate::error::SchemaError;
use crate::result::{ErrorKind, FieldError, ValidationResult};
use crate::rule::Rule;

/// A record of raw field values, as assembled from live inputs.
pub type Record = HashMap<String, String>;

type RefinePredicate = Box<dyn Fn(&Record) -> bool + Send + Sync>;

/// An ordered field declaration: a name and its rule list.
struct FieldDef {
    name: String,
    rules: Vec<Rule>,
}

/// A whole-record rule, evaluated only after every per-field rule passed.
///
/// The predicate must be pure and total over the record: it may read any
/// fields but must not panic or mutate shared state. A predicate that cannot
/// decide must return `false`.
struct Refinement {
    predicate: RefinePredicate,
    message: String,
    attribution: String,
}

/// An immutable validation schema over a named-field record.
///
/// Built once via [`Schema::builder`], then shared read-only by every
/// validation pass. [`Schema::validate`] is a pure function of the schema and
/// the candidate record; no state is retained between calls.
pub struct Schema {
    fields: Vec<FieldDef>,
    refinements: Vec<Refinement>,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field(
                "fields",
                &self.fields.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            )
            .field("refinements", &self.refinements.len())
            .finish_non_exhaustive()
    }
}

impl Schema {
    /// Creates a new schema builder.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Returns the declared field names, in definition order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|d| d.name.as_str())
    }

    /// Validates a candidate record.
    ///
    /// For each declared field, in definition order, the field's rules run in
    /// definition order and the first failure is recorded; one field's
    /// failure never suppresses validation of another. A field absent from
    /// `record` is checked as empty, and fields present in `record` but not
    /// declared here are ignored. Refinements run only when no field-level
    /// error was recorded; the first failing refinement is attributed to its
    /// designated field and stops refinement evaluation, so later refinements
    /// may assume earlier ones held.
    ///
    /// Never panics and never raises: the outcome is always a
    /// [`ValidationResult`]. On success the record's values are returned
    /// unchanged; no coercion is performed.
    pub fn validate(&self, record: &Record) -> ValidationResult {
        let mut errors = Vec::new();

        for field in &self.fields {
            let value = record.get(&field.name).map_or("", String::as_str);
            for rule in &field.rules {
                if let Err(message) = rule.check(value) {
                    errors.push(FieldError {
                        field: field.name.clone(),
                        kind: rule.kind(),
                        message,
                    });
                    break;
                }
            }
        }

        if errors.is_empty() {
            for refinement in &self.refinements {
                if !(refinement.predicate)(record) {
                    errors.push(FieldError {
                        field: refinement.attribution.clone(),
                        kind: ErrorKind::CrossFieldMismatch,
                        message: refinement.message.clone(),
                    });
                    break;
                }
            }
        }

        if errors.is_empty() {
            ValidationResult::Valid(record.clone())
        } else {
            ValidationResult::Invalid(errors)
        }
    }
}

/// Builder for [`Schema`].
///
/// Declarations are collected in order; [`SchemaBuilder::build`] enforces the
/// construction-time invariants and is the only way to obtain a schema.
#[derive(Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDef>,
    refinements: Vec<Refinement>,
}

impl std::fmt::Debug for SchemaBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("fields", &self.fields.len())
            .field("refinements", &self.refinements.len())
            .finish_non_exhaustive()
    }
}

impl SchemaBuilder {
    /// Declares a field with an ordered list of rules.
    ///
    /// A field with no rules always passes.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            rules: rules.into_iter().collect(),
        });
        self
    }

    /// Declares a whole-record refinement.
    ///
    /// `attribution` names the field the failure message is reported under,
    /// which need not be a field the predicate reads. It must be declared via
    /// [`SchemaBuilder::field`] before [`SchemaBuilder::build`] is called.
    #[must_use]
    pub fn refine<F>(
        mut self,
        predicate: F,
        message: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.refinements.push(Refinement {
            predicate: Box::new(predicate),
            message: message.into(),
            attribution: attribution.into(),
        });
        self
    }

    /// Finalizes the schema.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if a field name is empty or duplicated, or
    /// if a refinement is attributed to an undeclared field.
    pub fn build(self) -> Result<Schema, SchemaError> {
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if self.fields[..i].iter().any(|d| d.name == field.name) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }
        for refinement in &self.refinements {
            if !self.fields.iter().any(|d| d.name == refinement.attribution) {
                return Err(SchemaError::UnknownAttributionField(
                    refinement.attribution.clone(),
                ));
            }
        }
        Ok(Schema {
            fields: self.fields,
            refinements: self.refinements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn create_user_schema() -> Schema {
        Schema::builder()
            .field(
                "username",
                [
                    Rule::required_with("Username is required"),
                    Rule::pattern_with("^[A-Za-z]+$", "Only letters are allowed").unwrap(),
                ],
            )
            .field("password", [Rule::required_with("Password is required")])
            .field(
                "confirm_password",
                [Rule::required_with("Confirm password is required")],
            )
            .refine(
                |r| r.get("password") == r.get("confirm_password"),
                "Password doesn't match",
                "confirm_password",
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_valid_record_returned_unchanged() {
        let schema = create_user_schema();
        let input = record(&[
            ("username", "ann"),
            ("password", "x"),
            ("confirm_password", "x"),
        ]);
        assert_eq!(schema.validate(&input), ValidationResult::Valid(input));
    }

    #[test]
    fn test_refinement_failure_attributed_to_designated_field() {
        let schema = create_user_schema();
        let input = record(&[
            ("username", "ann"),
            ("password", "x"),
            ("confirm_password", "y"),
        ]);
        let result = schema.validate(&input);
        assert_eq!(
            result.errors(),
            &[FieldError {
                field: "confirm_password".to_string(),
                kind: ErrorKind::CrossFieldMismatch,
                message: "Password doesn't match".to_string(),
            }]
        );
    }

    #[test]
    fn test_pattern_failure_reported_per_field() {
        let schema = create_user_schema();
        let input = record(&[
            ("username", "an1"),
            ("password", "x"),
            ("confirm_password", "x"),
        ]);
        let result = schema.validate(&input);
        assert_eq!(
            result.errors(),
            &[FieldError {
                field: "username".to_string(),
                kind: ErrorKind::PatternMismatch,
                message: "Only letters are allowed".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_field_checked_as_empty() {
        let schema = create_user_schema();
        let result = schema.validate(&record(&[("username", "ann"), ("password", "x")]));
        let errors = result.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirm_password");
        assert_eq!(errors[0].kind, ErrorKind::MissingRequiredValue);
    }

    #[test]
    fn test_field_errors_are_independent() {
        let schema = create_user_schema();
        let result = schema.validate(&record(&[("confirm_password", "x")]));
        let fields: Vec<_> = result.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["username", "password"]);
    }

    #[test]
    fn test_first_failing_rule_per_field_wins() {
        let schema = create_user_schema();
        let result = schema.validate(&record(&[("password", "x"), ("confirm_password", "x")]));
        // Both the required and the pattern rule fail on an empty username;
        // only the required one is reported.
        assert_eq!(
            result.errors(),
            &[FieldError {
                field: "username".to_string(),
                kind: ErrorKind::MissingRequiredValue,
                message: "Username is required".to_string(),
            }]
        );
    }

    #[test]
    fn test_refinements_skipped_when_field_errors_exist() {
        let schema = create_user_schema();
        // confirm_password both misses its required rule and mismatches the
        // password; only the field-level error may surface.
        let result = schema.validate(&record(&[("username", "ann"), ("password", "x")]));
        assert!(result
            .errors()
            .iter()
            .all(|e| e.kind != ErrorKind::CrossFieldMismatch));
    }

    #[test]
    fn test_refinement_evaluation_stops_at_first_failure() {
        let schema = Schema::builder()
            .field("a", [])
            .field("b", [])
            .refine(|_| false, "first", "a")
            .refine(|_| false, "second", "b")
            .build()
            .unwrap();
        let result = schema.validate(&Record::new());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].message, "first");
    }

    #[test]
    fn test_unknown_record_fields_ignored() {
        let schema = Schema::builder()
            .field("name", [Rule::required()])
            .build()
            .unwrap();
        let result = schema.validate(&record(&[("name", "ann"), ("extra", "ignored")]));
        assert!(result.is_valid());
    }

    #[test]
    fn test_empty_record_valid_without_required_rules() {
        let schema = Schema::builder()
            .field("nickname", [Rule::max_length_with(10, "Keep it short")])
            .build()
            .unwrap();
        assert!(schema.validate(&Record::new()).is_valid());
    }

    #[test]
    fn test_field_with_no_rules_always_passes() {
        let schema = Schema::builder().field("free", []).build().unwrap();
        assert!(schema.validate(&Record::new()).is_valid());
    }

    #[test]
    fn test_duplicate_field_rejected_at_build() {
        let result = Schema::builder()
            .field("name", [Rule::required()])
            .field("name", [])
            .build();
        assert!(matches!(result, Err(SchemaError::DuplicateField(f)) if f == "name"));
    }

    #[test]
    fn test_empty_field_name_rejected_at_build() {
        let result = Schema::builder().field("", []).build();
        assert!(matches!(result, Err(SchemaError::EmptyFieldName)));
    }

    #[test]
    fn test_refinement_on_undeclared_field_rejected_at_build() {
        let result = Schema::builder()
            .field("password", [Rule::required()])
            .refine(|_| true, "mismatch", "confirm_password")
            .build();
        assert!(matches!(
            result,
            Err(SchemaError::UnknownAttributionField(f)) if f == "confirm_password"
        ));
    }

    #[test]
    fn test_field_names_in_definition_order() {
        let schema = create_user_schema();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, ["username", "password", "confirm_password"]);
    }
}
