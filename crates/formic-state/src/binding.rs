//! Live input-to-field bindings.

use std::sync::{Arc, RwLock};

use crate::controller::{read_inner, write_inner, FormInner};

/// Handle binding one presentation-layer input to a tracked field.
///
/// Returned by [`FormController::register`](crate::FormController::register).
/// Clones, and bindings obtained from repeated registration of the same name,
/// all share the same underlying slot.
#[derive(Clone)]
pub struct FieldBinding {
    name: String,
    inner: Arc<RwLock<FormInner>>,
}

impl std::fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl FieldBinding {
    pub(crate) fn new(name: String, inner: Arc<RwLock<FormInner>>) -> Self {
        Self { name, inner }
    }

    /// The bound field's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current tracked value.
    pub fn value(&self) -> String {
        read_inner(&self.inner)
            .values
            .get(&self.name)
            .cloned()
            .unwrap_or_default()
    }

    /// Writes a new value, synchronously, and notifies this field's
    /// subscribers.
    ///
    /// No validation runs here; errors change only on submit.
    pub fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        let subscribers = {
            let mut inner = write_inner(&self.inner);
            inner.values.insert(self.name.clone(), value.clone());
            inner
                .subscribers
                .get(&self.name)
                .cloned()
                .unwrap_or_default()
        };
        // Callbacks run outside the lock so they may read the form state.
        for subscriber in subscribers {
            subscriber(&value);
        }
    }
}

#[cfg(test)]
mod tests {
    use formic_schema::{Rule, Schema};

    use crate::FormController;

    #[test]
    fn test_clones_share_the_slot() {
        let schema = Schema::builder()
            .field("name", [Rule::required()])
            .build()
            .unwrap();
        let controller = FormController::new(schema);
        let binding = controller.register("name");
        let clone = binding.clone();
        binding.set_value("ann");
        assert_eq!(clone.value(), "ann");
        assert_eq!(binding.name(), "name");
    }
}
