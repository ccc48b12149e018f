/// Licensing capability consulted once, when the filter is built.
pub trait ActivationGate {
    fn is_activated(&self) -> bool;
}

/// Gate with a fixed answer, typically sourced from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticActivation {
    activated: bool,
}

impl StaticActivation {
    pub const fn new(activated: bool) -> Self {
        Self { activated }
    }
}

impl ActivationGate for StaticActivation {
    fn is_activated(&self) -> bool {
        self.activated
    }
}

impl ActivationGate for bool {
    fn is_activated(&self) -> bool {
        *self
    }
}
