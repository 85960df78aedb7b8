//! Configuration for Rust emission.

/// Configuration for Rust emission.
#[derive(Clone, Debug)]
pub struct RustEmitConfig {
    /// Type the generated states borrow.
    pub(crate) builder_type: String,
    /// Visibility of generated items; empty for private.
    pub(crate) visibility: String,
    /// Whether to start with the `@generated` marker.
    pub(crate) header: bool,
}

impl RustEmitConfig {
    pub fn new(builder_type: impl Into<String>) -> Self {
        Self {
            builder_type: builder_type.into(),
            visibility: "pub".to_string(),
            header: true,
        }
    }

    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = visibility.into();
        self
    }

    pub fn header(mut self, value: bool) -> Self {
        self.header = value;
        self
    }
}
