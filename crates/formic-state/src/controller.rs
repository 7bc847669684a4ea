//! The form controller: live values, submit sequencing, error exposure.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use formic_schema::{Record, Schema, ValidationResult};
use tracing::debug;

use crate::binding::FieldBinding;
use crate::event::SubmitEvent;

type Subscriber = Arc<dyn Fn(&str) + Send + Sync>;
type DiagnosticSink = Arc<dyn Fn(&HashMap<String, String>) + Send + Sync>;

/// Mutable per-form state, shared between the controller and its bindings.
#[derive(Default)]
pub(crate) struct FormInner {
    /// Current raw value per field, written on every edit.
    pub(crate) values: HashMap<String, String>,
    /// Current error message per field, written only by an applied submit.
    errors: HashMap<String, String>,
    /// Sequence number of the most recently started submit.
    submit_seq: u64,
    /// Sequence number of the most recently applied validation result.
    applied_seq: u64,
    /// Set while a submit pass (including its completion callback) runs.
    submitting: bool,
    /// Per-field change observers.
    pub(crate) subscribers: HashMap<String, Vec<Subscriber>>,
}

pub(crate) fn read_inner(inner: &RwLock<FormInner>) -> RwLockReadGuard<'_, FormInner> {
    inner.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_inner(inner: &RwLock<FormInner>) -> RwLockWriteGuard<'_, FormInner> {
    inner.write().unwrap_or_else(PoisonError::into_inner)
}

/// Controller for one mounted form.
///
/// Holds the live field values and the error map for a single form instance;
/// there is no process-wide state. Values change synchronously on every edit,
/// while validation runs only when a submit handler fires. Clones share the
/// same underlying form state.
#[derive(Clone)]
pub struct FormController {
    schema: Arc<Schema>,
    inner: Arc<RwLock<FormInner>>,
    diagnostics: Option<DiagnosticSink>,
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = read_inner(&self.inner);
        f.debug_struct("FormController")
            .field("schema", &self.schema)
            .field("values", &inner.values)
            .field("errors", &inner.errors)
            .field("submit_seq", &inner.submit_seq)
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Creates a controller over an immutable schema.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
            inner: Arc::new(RwLock::new(FormInner::default())),
            diagnostics: None,
        }
    }

    /// Installs a diagnostic sink invoked with the error map after every
    /// applied validation pass.
    #[must_use]
    pub fn with_diagnostics<F>(mut self, sink: F) -> Self
    where
        F: Fn(&HashMap<String, String>) + Send + Sync + 'static,
    {
        self.diagnostics = Some(Arc::new(sink));
        self
    }

    /// Registers a field and returns its binding.
    ///
    /// Idempotent by field name: registering the same name again rebinds the
    /// same underlying slot rather than creating a second tracked value.
    pub fn register(&self, name: impl Into<String>) -> FieldBinding {
        let name = name.into();
        write_inner(&self.inner)
            .values
            .entry(name.clone())
            .or_default();
        debug!(field = %name, "registered field binding");
        FieldBinding::new(name, Arc::clone(&self.inner))
    }

    /// Returns the current live value for a field.
    ///
    /// Pure read: reflects the most recent binding-driven update, `None` if
    /// the field was never registered or written.
    pub fn watch(&self, name: &str) -> Option<String> {
        read_inner(&self.inner).values.get(name).cloned()
    }

    /// Subscribes to value changes of one field.
    ///
    /// The callback runs synchronously with the new value on every write to
    /// that field's binding. Subscriptions live as long as the form state.
    pub fn subscribe<F>(&self, name: impl Into<String>, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        write_inner(&self.inner)
            .subscribers
            .entry(name.into())
            .or_default()
            .push(Arc::new(callback));
    }

    /// Returns a snapshot of the current error map.
    ///
    /// Reflects only the most recently applied submit; edits between submits
    /// do not re-validate.
    pub fn errors(&self) -> HashMap<String, String> {
        read_inner(&self.inner).errors.clone()
    }

    /// Returns the current error message for one field, if any.
    pub fn error(&self, name: &str) -> Option<String> {
        read_inner(&self.inner).errors.get(name).cloned()
    }

    /// Starts a submit pass: allocates the next sequence number and snapshots
    /// the current values as the candidate record.
    ///
    /// Exposed so that implementations completing validation out of band
    /// (remote rules) can participate in the same ordering as
    /// [`SubmitHandler::handle`].
    pub fn begin_submit(&self) -> (u64, Record) {
        let mut inner = write_inner(&self.inner);
        inner.submit_seq += 1;
        (inner.submit_seq, inner.values.clone())
    }

    /// Applies a completed validation result for the given submit sequence.
    ///
    /// Results apply in sequence order: a result that is not newer than both
    /// the latest started submit and the latest applied result is discarded,
    /// and `false` is returned. On apply, an invalid result replaces the
    /// error map with one message per failed field and a valid result clears
    /// it; the diagnostic sink, if installed, then receives the new map.
    pub fn apply_result(&self, seq: u64, result: &ValidationResult) -> bool {
        let snapshot = {
            let mut inner = write_inner(&self.inner);
            if seq < inner.submit_seq || seq <= inner.applied_seq {
                debug!(
                    seq,
                    current = inner.submit_seq,
                    applied = inner.applied_seq,
                    "discarding stale validation result"
                );
                return false;
            }
            inner.applied_seq = seq;
            inner.errors.clear();
            for error in result.errors() {
                inner.errors.insert(error.field.clone(), error.message.clone());
            }
            inner.errors.clone()
        };
        debug!(seq, errors = snapshot.len(), "applied validation result");
        if let Some(sink) = &self.diagnostics {
            sink(&snapshot);
        }
        true
    }

    /// Builds a submit event handler around a completion callback.
    ///
    /// `on_valid` receives the validated record, exactly once per submit that
    /// passes every rule; it is never called for an invalid or superseded
    /// pass.
    pub fn handle_submit<F>(&self, on_valid: F) -> SubmitHandler
    where
        F: Fn(&Record) + Send + Sync + 'static,
    {
        SubmitHandler {
            controller: self.clone(),
            on_valid: Box::new(on_valid),
        }
    }
}

/// Submit event handler bound to one completion callback.
pub struct SubmitHandler {
    controller: FormController,
    on_valid: Box<dyn Fn(&Record) + Send + Sync>,
}

impl std::fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitHandler")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl SubmitHandler {
    /// Runs one validation pass over the current values.
    ///
    /// Prevents the event's default action, snapshots the values, validates
    /// them against the schema, and applies the outcome to the form state.
    /// Never panics and never raises: failures land in the controller's error
    /// map. A reentrant invocation, such as a submit fired from within the
    /// completion callback, is ignored.
    pub fn handle(&self, event: &mut dyn SubmitEvent) {
        event.prevent_default();
        {
            let mut inner = write_inner(&self.controller.inner);
            if inner.submitting {
                debug!("ignoring reentrant submit");
                return;
            }
            inner.submitting = true;
        }
        let (seq, record) = self.controller.begin_submit();
        debug!(seq, "validating submitted record");
        let result = self.controller.schema.validate(&record);
        let applied = self.controller.apply_result(seq, &result);
        if applied && result.is_valid() {
            // Outside the state lock; the callback may read the controller.
            (self.on_valid)(&record);
        }
        write_inner(&self.controller.inner).submitting = false;
    }
}
