//! Configuration for state synthesis.

/// Configuration for state synthesis.
#[derive(Clone, Debug)]
pub struct SynthesisConfig {
    /// Name of the entry state; other states append their node index.
    pub(crate) base_name: String,
    /// Rendering of dynamically typed parameters.
    pub(crate) dynamic_marker: String,
    /// Skip states not reachable from the entry
    pub(crate) prune_unreachable: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            base_name: "Syntax".to_string(),
            dynamic_marker: "Box<dyn std::any::Any>".to_string(),
            prune_unreachable: false,
        }
    }
}

impl SynthesisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_name(mut self, name: impl Into<String>) -> Self {
        self.base_name = name.into();
        self
    }

    /// Set the type rendered for `?` parameters.
    pub fn dynamic_marker(mut self, marker: impl Into<String>) -> Self {
        self.dynamic_marker = marker.into();
        self
    }

    pub fn prune_unreachable(mut self, value: bool) -> Self {
        self.prune_unreachable = value;
        self
    }

    /// Name of the state for `node`.
    pub fn state_name(&self, node: u32) -> String {
        if node == 0 {
            self.base_name.clone()
        } else {
            format!("{}{}", self.base_name, node)
        }
    }
}
