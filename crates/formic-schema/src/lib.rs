//! # formic-schema
//!
//! Declarative validation over named-field records.
//!
//! A [`Schema`] is built once from ordered field declarations (each with an
//! ordered rule list) and whole-record refinements, then evaluated against
//! candidate records. A pass yields either the record unchanged or an ordered
//! list of field-scoped errors, one per failing field.
//!
//! ## Quick Start
//!
//! ```rust
//! use formic_schema::{Record, Rule, Schema};
//!
//! # fn main() -> Result<(), formic_schema::SchemaError> {
//! let schema = Schema::builder()
//!     .field(
//!         "username",
//!         [
//!             Rule::required_with("Username is required"),
//!             Rule::pattern_with("^[A-Za-z]+$", "Only letters are allowed")?,
//!         ],
//!     )
//!     .field("password", [Rule::required_with("Password is required")])
//!     .field(
//!         "confirm_password",
//!         [Rule::required_with("Confirm password is required")],
//!     )
//!     .refine(
//!         |r| r.get("password") == r.get("confirm_password"),
//!         "Password doesn't match",
//!         "confirm_password",
//!     )
//!     .build()?;
//!
//! let record: Record = [
//!     ("username".to_string(), "ann".to_string()),
//!     ("password".to_string(), "x".to_string()),
//!     ("confirm_password".to_string(), "y".to_string()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let result = schema.validate(&record);
//! assert!(!result.is_valid());
//! assert_eq!(result.errors()[0].field, "confirm_password");
//! assert_eq!(result.errors()[0].message, "Password doesn't match");
//! # Ok(())
//! # }
//! ```

mod error;
mod result;
mod rule;
mod schema;

pub use error::SchemaError;
pub use result::{ErrorKind, FieldError, ValidationResult};
pub use rule::Rule;
pub use schema::{Record, Schema, SchemaBuilder};
