#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Snout.
//!
//! Two layers:
//! - **Catalog layer**: the builder actions a grammar may reference, keyed by terminal index
//! - **Manifest layer**: 1:1 mapping to the JSON manifest consumed by the CLI

pub mod catalog;
pub mod colors;
pub mod manifest;
pub mod types;
pub mod utils;

#[cfg(test)]
mod catalog_tests;
#[cfg(test)]
mod manifest_tests;

pub use catalog::{
    ActionCatalog, ActionMetadata, CallStyle, CatalogError, CatalogProvider, Parameter,
    TerminalId,
};
pub use colors::Colors;
pub use manifest::Manifest;
pub use types::{TypeDescriptor, TypeParseError};
