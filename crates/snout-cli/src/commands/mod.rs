pub mod check;
pub mod dump;
pub mod generate;
pub mod manifest_loader;
pub mod run_common;

#[cfg(test)]
mod manifest_loader_tests;
