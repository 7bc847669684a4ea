//! Console rendition of a create-user form.
//!
//! The "presentation layer" here is plain text: each scenario fills the three
//! inputs, fires the submit handler, and prints either the per-field errors
//! or the validated record as JSON.

use formic_schema::{Rule, Schema, SchemaError};
use formic_state::{FormController, FormEvent};

fn create_user_schema() -> Result<Schema, SchemaError> {
    Schema::builder()
        .field(
            "username",
            [
                Rule::required_with("Username is required"),
                Rule::pattern_with("^[A-Za-z]+$", "Only letters are allowed")?,
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
}

fn main() -> Result<(), SchemaError> {
    let schema = create_user_schema()?;
    let field_names: Vec<String> = schema.field_names().map(str::to_string).collect();

    let controller = FormController::new(schema);
    let bindings: Vec<_> = field_names
        .iter()
        .map(|name| controller.register(name.clone()))
        .collect();

    let handler = controller.handle_submit(|record| {
        let json = serde_json::to_string_pretty(record).unwrap_or_default();
        println!("created user:\n{json}");
    });

    let attempts = [
        ("ann", "x", "y"),
        ("an1", "x", "x"),
        ("ann", "x", "x"),
    ];

    for (username, password, confirm_password) in attempts {
        println!("--- submitting username={username:?} ---");
        bindings[0].set_value(username);
        bindings[1].set_value(password);
        bindings[2].set_value(confirm_password);

        handler.handle(&mut FormEvent::new());
        for (field, message) in controller.errors() {
            println!("{field}: {message}");
        }
    }

    Ok(())
}
