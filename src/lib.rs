// File: src/lib.rs
pub mod config;
pub mod logging;
pub mod mobile;
pub mod model;
pub mod paths;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;

uniffi::setup_scaffolding!();
