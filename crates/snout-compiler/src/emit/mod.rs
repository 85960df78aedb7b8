//! Code emission from state descriptors.
//!
//! Emitters are stateless over their input: the same descriptors and config
//! always produce the same text.

mod config;
mod rust;


pub use config::RustEmitConfig;
pub use rust::emit_rust;

/// Emission failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("state `{state}` has two operations named `{name}`")]
    DuplicateOperation { state: String, name: String },
}
