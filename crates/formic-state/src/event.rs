//! Submit events from the presentation layer.

/// A submit gesture delivered by the presentation layer.
///
/// The handler always suppresses the host's native submission side effect
/// before validating, whatever that side effect is for the host in question.
pub trait SubmitEvent {
    /// Suppresses the native submission side effect.
    fn prevent_default(&mut self);
}

/// Minimal concrete submit event for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct FormEvent {
    default_prevented: bool,
}

impl FormEvent {
    /// Creates a new event with the default action still pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the default action was suppressed.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl SubmitEvent for FormEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}
