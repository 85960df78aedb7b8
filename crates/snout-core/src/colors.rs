//! ANSI color codes for dumps.
//!
//! - State: state and node names
//! - Action: operation names and terminals
//! - Muted: arrows, tombstones, metadata

/// ANSI palette for CLI dumps. Standard 16-color codes only.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub state: &'static str,
    pub action: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        state: "\x1b[34m",
        action: "\x1b[32m",
        muted: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        state: "",
        action: "",
        muted: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    pub fn state(&self, text: &str) -> String {
        format!("{}{}{}", self.state, text, self.reset)
    }

    pub fn action(&self, text: &str) -> String {
        format!("{}{}{}", self.action, text, self.reset)
    }

    pub fn muted(&self, text: &str) -> String {
        format!("{}{}{}", self.muted, text, self.reset)
    }
}
