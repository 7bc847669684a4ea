//! # formic-state
//!
//! A form state controller over [`formic-schema`](formic_schema).
//!
//! One [`FormController`] lives per mounted form. The presentation layer
//! registers a [`FieldBinding`] per input and writes every edit through it;
//! validation runs only when the handler from
//! [`FormController::handle_submit`] fires. The resulting error map, one
//! message per failed field, stays readable until the next applied submit,
//! and the completion callback receives the validated record exactly once
//! per passing submit.
//!
//! ## Quick Start
//!
//! ```rust
//! use formic_schema::{Rule, Schema};
//! use formic_state::{FormController, FormEvent};
//!
//! # fn main() -> Result<(), formic_schema::SchemaError> {
//! let schema = Schema::builder()
//!     .field("username", [Rule::required_with("Username is required")])
//!     .build()?;
//!
//! let controller = FormController::new(schema);
//! let username = controller.register("username");
//!
//! username.set_value("ann");
//! let handler = controller.handle_submit(|record| {
//!     assert_eq!(record.get("username").map(String::as_str), Some("ann"));
//! });
//! handler.handle(&mut FormEvent::new());
//! assert!(controller.errors().is_empty());
//! # Ok(())
//! # }
//! ```

mod binding;
mod controller;
mod event;

pub use binding::FieldBinding;
pub use controller::{FormController, SubmitHandler};
pub use event::{FormEvent, SubmitEvent};
